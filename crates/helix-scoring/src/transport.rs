//! HTTP adapter for an out-of-process model service. One endpoint per
//! disease, each an isolated failure domain.

use std::time::Duration;

use helix_core::errors::ScoringError;
use helix_core::models::{FeatureVector, RiskScore};
use helix_core::traits::{RiskScorer, ScoreOutput};

use crate::protocol::{ScoreRequest, ScoreResponse};

/// Scorer speaking the JSON wire protocol to a remote model service.
///
/// The per-call deadline lives on the underlying client; exceeding it (or
/// any transport failure) maps to `ScoringError::Unavailable`, which the
/// router treats as retryable. An explicit inference rejection from the
/// service maps to `ScoringError::Inference`, which is not.
#[derive(Debug)]
pub struct HttpScorer {
    disease_id: String,
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpScorer {
    /// Build a scorer for one disease endpoint with a bounded per-call
    /// timeout. Client construction failure is a boot-time error.
    pub fn new(
        disease_id: impl Into<String>,
        endpoint: impl Into<String>,
        call_timeout: Duration,
    ) -> Result<Self, ScoringError> {
        let disease_id = disease_id.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(call_timeout)
            .build()
            .map_err(|e| ScoringError::WeightsLoad {
                disease_id: disease_id.clone(),
                reason: format!("http client: {e}"),
            })?;
        Ok(Self {
            disease_id,
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl RiskScorer for HttpScorer {
    fn disease_id(&self) -> &str {
        &self.disease_id
    }

    fn score(&self, features: &FeatureVector) -> Result<ScoreOutput, ScoringError> {
        let request = ScoreRequest::new(&self.disease_id, features);
        tracing::debug!(
            disease_id = %self.disease_id,
            request_id = %request.request_id,
            endpoint = %self.endpoint,
            "dispatching score request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|e| ScoringError::Unavailable {
                disease_id: self.disease_id.clone(),
                reason: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    format!("transport: {e}")
                },
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ScoringError::Unavailable {
                disease_id: self.disease_id.clone(),
                reason: format!("service error ({status})"),
            });
        }

        // A 4xx is a rejection whether or not the body is a protocol
        // envelope; only a malformed 2xx counts as transport trouble.
        let body: ScoreResponse = match response.json() {
            Ok(body) => body,
            Err(e) if status.is_client_error() => {
                return Err(ScoringError::Inference {
                    disease_id: self.disease_id.clone(),
                    reason: format!("service rejected request ({status}): {e}"),
                });
            }
            Err(e) => {
                return Err(ScoringError::Unavailable {
                    disease_id: self.disease_id.clone(),
                    reason: format!("malformed response: {e}"),
                });
            }
        };

        if status.is_client_error() || !body.success {
            // The service looked at the input and said no. Permanent.
            return Err(ScoringError::Inference {
                disease_id: self.disease_id.clone(),
                reason: body
                    .error
                    .unwrap_or_else(|| format!("service rejected request ({status})")),
            });
        }

        match (body.risk_score, body.model_version) {
            (Some(score), Some(model_version)) => Ok(ScoreOutput {
                risk_score: RiskScore::new(score),
                model_version,
            }),
            _ => Err(ScoringError::Unavailable {
                disease_id: self.disease_id.clone(),
                reason: "response missing risk_score or model_version".to_string(),
            }),
        }
    }
}
