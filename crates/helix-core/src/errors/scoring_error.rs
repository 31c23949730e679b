/// Model service errors. `Inference` is permanent (caller error);
/// `Unavailable` is transient (transport/timeout) and retryable.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("inference rejected for {disease_id}: {reason}")]
    Inference { disease_id: String, reason: String },

    #[error("model service for {disease_id} unavailable: {reason}")]
    Unavailable { disease_id: String, reason: String },

    #[error("no model service registered for disease: {disease_id}")]
    UnknownDisease { disease_id: String },

    #[error("model weights failed to load for {disease_id}: {reason}")]
    WeightsLoad { disease_id: String, reason: String },
}
