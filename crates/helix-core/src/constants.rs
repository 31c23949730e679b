//! Pipeline-wide named constants. Tunables that product may revisit live
//! here rather than scattered through the subsystems.

/// Consent feature gating all model inference.
pub const FEATURE_ML_PREDICTION: &str = "ml_prediction";

/// Consent feature gating long-term artifact retention.
pub const FEATURE_DATA_STORAGE: &str = "data_storage";

/// Consent feature gating report export to third parties.
pub const FEATURE_REPORT_SHARING: &str = "report_sharing";

/// Every feature id the consent ledger accepts. Grants against anything
/// else are rejected with `ConsentError::InvalidFeature`.
pub const KNOWN_FEATURES: &[&str] = &[
    FEATURE_ML_PREDICTION,
    FEATURE_DATA_STORAGE,
    FEATURE_REPORT_SHARING,
];

/// Risk scores below this bucket as `RiskClass::Low`.
pub const RISK_LOW_CEILING: f64 = 0.3;

/// Risk scores below this (and at or above `RISK_LOW_CEILING`) bucket as
/// `RiskClass::Moderate`; at or above, `RiskClass::High`.
pub const RISK_MODERATE_CEILING: f64 = 0.6;

/// Default bounded attempts for an unavailable model service.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default first backoff delay; doubles per subsequent attempt.
pub const DEFAULT_BASE_BACKOFF_MS: u64 = 100;

/// Default cap on total elapsed time across all attempts.
pub const DEFAULT_MAX_ELAPSED_MS: u64 = 10_000;

/// Default per-call deadline for a model service invocation.
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 2_000;
