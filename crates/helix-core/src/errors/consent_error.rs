/// Consent ledger errors.
#[derive(Debug, thiserror::Error)]
pub enum ConsentError {
    #[error("unknown consent feature: {feature_id}")]
    InvalidFeature { feature_id: String },

    #[error(
        "consent required for feature '{feature_id}': grant it in privacy settings and retry"
    )]
    Required { feature_id: String },
}
