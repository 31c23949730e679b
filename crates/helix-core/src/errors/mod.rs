//! Error taxonomy. One enum per subsystem, folded into `HelixError`.

mod consent_error;
mod router_error;
mod scoring_error;
mod storage_error;
mod upload_error;

pub use consent_error::ConsentError;
pub use router_error::RouterError;
pub use scoring_error::ScoringError;
pub use storage_error::StorageError;
pub use upload_error::UploadError;

/// Convenience alias used across the workspace.
pub type HelixResult<T> = Result<T, HelixError>;

/// Top-level error for the Helix pipeline.
#[derive(Debug, thiserror::Error)]
pub enum HelixError {
    #[error(transparent)]
    Consent(#[from] ConsentError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Router(#[from] RouterError),
}

impl HelixError {
    /// True for transient failures the caller should retry; false for
    /// permanent rejections (bad input, missing consent, bad upload).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            HelixError::Scoring(ScoringError::Unavailable { .. })
                | HelixError::Router(RouterError::Unavailable { .. })
        )
    }
}
