//! Ledger behavior over real (in-memory) storage: grant/revoke lifecycle,
//! the one-active-record invariant under concurrency, and feature checks.

use std::sync::Arc;

use helix_consent::ConsentLedger;
use helix_core::constants::FEATURE_ML_PREDICTION;
use helix_core::errors::{ConsentError, HelixError};
use helix_storage::StorageEngine;

use proptest::prelude::*;

fn ledger() -> ConsentLedger<Arc<StorageEngine>> {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    ConsentLedger::new(engine)
}

#[test]
fn grant_then_check_is_active() {
    let ledger = ledger();
    assert!(!ledger.is_active("user-1", FEATURE_ML_PREDICTION).unwrap());

    ledger.grant("user-1", FEATURE_ML_PREDICTION, "v1").unwrap();
    assert!(ledger.is_active("user-1", FEATURE_ML_PREDICTION).unwrap());
    assert_eq!(
        ledger.current_version("user-1", FEATURE_ML_PREDICTION).unwrap(),
        Some("v1".to_string())
    );
}

#[test]
fn regrant_supersedes_and_keeps_history() {
    let ledger = ledger();
    ledger.grant("user-1", FEATURE_ML_PREDICTION, "v1").unwrap();
    ledger.grant("user-1", FEATURE_ML_PREDICTION, "v2").unwrap();

    assert_eq!(
        ledger.current_version("user-1", FEATURE_ML_PREDICTION).unwrap(),
        Some("v2".to_string())
    );

    let history = ledger.history("user-1", FEATURE_ML_PREDICTION).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.iter().filter(|r| r.is_active()).count(), 1);
    // Newest first.
    assert_eq!(history[0].version, "v2");
}

#[test]
fn revoke_then_regrant() {
    let ledger = ledger();
    ledger.grant("user-1", FEATURE_ML_PREDICTION, "v1").unwrap();
    ledger.revoke("user-1", FEATURE_ML_PREDICTION).unwrap();
    assert!(!ledger.is_active("user-1", FEATURE_ML_PREDICTION).unwrap());

    // Revoking again is a no-op.
    ledger.revoke("user-1", FEATURE_ML_PREDICTION).unwrap();

    ledger.grant("user-1", FEATURE_ML_PREDICTION, "v2").unwrap();
    assert!(ledger.is_active("user-1", FEATURE_ML_PREDICTION).unwrap());
}

#[test]
fn keys_are_independent() {
    let ledger = ledger();
    ledger.grant("user-1", FEATURE_ML_PREDICTION, "v1").unwrap();
    assert!(!ledger.is_active("user-2", FEATURE_ML_PREDICTION).unwrap());
    assert!(!ledger.is_active("user-1", "data_storage").unwrap());
}

#[test]
fn unknown_feature_is_rejected() {
    let ledger = ledger();
    let err = ledger.grant("user-1", "telepathy", "v1").unwrap_err();
    assert!(matches!(
        err,
        HelixError::Consent(ConsentError::InvalidFeature { .. })
    ));
    assert!(!err.is_retryable());
    assert!(ledger.is_active("user-1", "telepathy").is_err());
}

#[test]
fn custom_feature_set_overrides_registry() {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    let ledger = ConsentLedger::with_features(engine, vec!["pilot_study".to_string()]);
    ledger.grant("user-1", "pilot_study", "v1").unwrap();
    assert!(ledger.grant("user-1", FEATURE_ML_PREDICTION, "v1").is_err());
}

#[test]
fn concurrent_grants_leave_exactly_one_active() {
    let ledger = ledger();
    std::thread::scope(|s| {
        for i in 0..16 {
            let ledger = &ledger;
            s.spawn(move || {
                ledger
                    .grant("user-1", FEATURE_ML_PREDICTION, &format!("v{i}"))
                    .unwrap();
            });
        }
    });

    let history = ledger.history("user-1", FEATURE_ML_PREDICTION).unwrap();
    assert_eq!(history.len(), 16);
    assert_eq!(history.iter().filter(|r| r.is_active()).count(), 1);
    assert!(ledger.is_active("user-1", FEATURE_ML_PREDICTION).unwrap());
}

#[test]
fn concurrent_grant_revoke_interleaving_never_doubles_active() {
    let ledger = ledger();
    std::thread::scope(|s| {
        for i in 0..8 {
            let ledger = &ledger;
            s.spawn(move || {
                ledger
                    .grant("user-1", FEATURE_ML_PREDICTION, &format!("v{i}"))
                    .unwrap();
                ledger.revoke("user-1", FEATURE_ML_PREDICTION).unwrap();
            });
        }
    });

    let history = ledger.history("user-1", FEATURE_ML_PREDICTION).unwrap();
    assert!(history.iter().filter(|r| r.is_active()).count() <= 1);
}

proptest! {
    /// Any grant/revoke sequence leaves at most one active record, and the
    /// active version (if any) matches the last applied grant.
    #[test]
    fn grant_revoke_sequences_hold_the_invariant(ops in prop::collection::vec(any::<bool>(), 1..24)) {
        let ledger = ledger();
        let mut expected: Option<String> = None;
        for (i, is_grant) in ops.iter().enumerate() {
            if *is_grant {
                let version = format!("v{i}");
                ledger.grant("user-1", FEATURE_ML_PREDICTION, &version).unwrap();
                expected = Some(version);
            } else {
                ledger.revoke("user-1", FEATURE_ML_PREDICTION).unwrap();
                expected = None;
            }
        }

        prop_assert_eq!(
            ledger.current_version("user-1", FEATURE_ML_PREDICTION).unwrap(),
            expected
        );
        let history = ledger.history("user-1", FEATURE_ML_PREDICTION).unwrap();
        prop_assert!(history.iter().filter(|r| r.is_active()).count() <= 1);
    }
}
