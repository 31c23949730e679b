//! ConsentLedger — key-serialized mutations over an `IConsentStore`.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use dashmap::DashMap;

use helix_core::constants::KNOWN_FEATURES;
use helix_core::errors::{ConsentError, HelixResult};
use helix_core::models::ConsentRecord;
use helix_core::traits::IConsentStore;

/// The consent ledger. Generic over its backing store so tests can run it
/// against in-memory SQLite.
pub struct ConsentLedger<S: IConsentStore> {
    store: S,
    features: HashSet<String>,
    /// One mutex per (user, feature) key. Entries are created on first
    /// touch and never removed; the set of keys is small and bounded by
    /// users × features.
    key_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S: IConsentStore> ConsentLedger<S> {
    /// Create a ledger over the default feature registry.
    pub fn new(store: S) -> Self {
        Self::with_features(store, KNOWN_FEATURES.iter().map(|f| f.to_string()))
    }

    /// Create a ledger accepting a custom feature set.
    pub fn with_features(store: S, features: impl IntoIterator<Item = String>) -> Self {
        Self {
            store,
            features: features.into_iter().collect(),
            key_locks: DashMap::new(),
        }
    }

    /// Record a grant, superseding any prior active record for the same
    /// key. The supersede + insert happens in one storage transaction
    /// under the key lock, so no window exists where two active records
    /// coexist.
    pub fn grant(
        &self,
        user_id: &str,
        feature_id: &str,
        version: &str,
    ) -> HelixResult<ConsentRecord> {
        self.check_feature(feature_id)?;
        let lock = self.key_lock(user_id, feature_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let record = self
            .store
            .upsert_grant(user_id, feature_id, version, Utc::now())?;
        tracing::info!(user_id, feature_id, version, "consent granted");
        Ok(record)
    }

    /// Revoke the active record for the key. A no-op (not an error) when
    /// nothing is active.
    pub fn revoke(&self, user_id: &str, feature_id: &str) -> HelixResult<()> {
        self.check_feature(feature_id)?;
        let lock = self.key_lock(user_id, feature_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let revoked = self.store.revoke(user_id, feature_id, Utc::now())?;
        if revoked {
            tracing::info!(user_id, feature_id, "consent revoked");
        }
        Ok(())
    }

    /// True iff an active, non-revoked record exists. Always reads fresh
    /// from the store: a revocation must be visible to the next check.
    pub fn is_active(&self, user_id: &str, feature_id: &str) -> HelixResult<bool> {
        self.check_feature(feature_id)?;
        Ok(self.store.active_record(user_id, feature_id)?.is_some())
    }

    /// Consent document version of the active record, if any.
    pub fn current_version(&self, user_id: &str, feature_id: &str) -> HelixResult<Option<String>> {
        self.check_feature(feature_id)?;
        Ok(self
            .store
            .active_record(user_id, feature_id)?
            .map(|r| r.version))
    }

    /// Full grant/revoke history for a key, newest first.
    pub fn history(&self, user_id: &str, feature_id: &str) -> HelixResult<Vec<ConsentRecord>> {
        self.check_feature(feature_id)?;
        self.store.history(user_id, feature_id)
    }

    fn check_feature(&self, feature_id: &str) -> Result<(), ConsentError> {
        if self.features.contains(feature_id) {
            Ok(())
        } else {
            Err(ConsentError::InvalidFeature {
                feature_id: feature_id.to_string(),
            })
        }
    }

    fn key_lock(&self, user_id: &str, feature_id: &str) -> Arc<Mutex<()>> {
        let key = format!("{user_id}\u{1f}{feature_id}");
        self.key_locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
