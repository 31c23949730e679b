//! In-process scorer: a logistic model over the feature vector. Weights
//! are validated at construction — a scorer that cannot load its weights
//! fails at boot, never lazily per request.

use helix_core::errors::ScoringError;
use helix_core::models::{FeatureVector, RiskScore};
use helix_core::traits::{RiskScorer, ScoreOutput};

/// Deterministic local scorer. No shared mutable state; concurrent calls
/// with identical input yield identical output.
#[derive(Debug)]
pub struct LocalScorer {
    disease_id: String,
    weights: Vec<f64>,
    bias: f64,
    model_version: String,
}

impl LocalScorer {
    /// Load a scorer from its weights. Empty or non-finite weights are a
    /// boot-time failure.
    pub fn load(
        disease_id: impl Into<String>,
        weights: Vec<f64>,
        bias: f64,
        model_version: impl Into<String>,
    ) -> Result<Self, ScoringError> {
        let disease_id = disease_id.into();
        if weights.is_empty() {
            return Err(ScoringError::WeightsLoad {
                disease_id,
                reason: "empty weight vector".to_string(),
            });
        }
        if weights.iter().any(|w| !w.is_finite()) || !bias.is_finite() {
            return Err(ScoringError::WeightsLoad {
                disease_id,
                reason: "non-finite weight".to_string(),
            });
        }
        Ok(Self {
            disease_id,
            weights,
            bias,
            model_version: model_version.into(),
        })
    }
}

impl RiskScorer for LocalScorer {
    fn disease_id(&self) -> &str {
        &self.disease_id
    }

    fn score(&self, features: &FeatureVector) -> Result<ScoreOutput, ScoringError> {
        if features.len() != self.weights.len() {
            return Err(ScoringError::Inference {
                disease_id: self.disease_id.clone(),
                reason: format!(
                    "expected {} features, got {}",
                    self.weights.len(),
                    features.len()
                ),
            });
        }
        let z: f64 = self.bias
            + self
                .weights
                .iter()
                .zip(&features.values)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let score = 1.0 / (1.0 + (-z).exp());
        Ok(ScoreOutput {
            risk_score: RiskScore::new(score),
            model_version: self.model_version.clone(),
        })
    }
}
