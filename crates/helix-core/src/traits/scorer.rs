use crate::errors::ScoringError;
use crate::models::{FeatureVector, RiskScore};

/// Output of one scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutput {
    pub risk_score: RiskScore,
    /// Opaque version identifier of the model that produced the score.
    pub model_version: String,
}

/// A disease risk scorer. One instance per disease; stateless beyond
/// immutable loaded weights, so concurrent calls are independent and
/// identical inputs yield identical outputs.
///
/// Implementations must fail at construction if their weights cannot be
/// loaded — never lazily on the first `score` call.
pub trait RiskScorer: Send + Sync + std::fmt::Debug {
    /// The disease this scorer serves.
    fn disease_id(&self) -> &str;

    /// Score a feature vector. Wrong shape is `ScoringError::Inference`
    /// (permanent); transport/timeout trouble is `ScoringError::Unavailable`
    /// (transient).
    fn score(&self, features: &FeatureVector) -> Result<ScoreOutput, ScoringError>;
}
