//! Versioned wire protocol for HTTP model services — JSON with forward
//! compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use helix_core::models::FeatureVector;

/// Current protocol version.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Envelope for a scoring request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// Protocol version for forward compatibility.
    pub version: String,
    /// Unique request ID for tracing.
    pub request_id: String,
    /// Timestamp of the request.
    pub timestamp: DateTime<Utc>,
    pub disease_id: String,
    pub features: FeatureVector,
}

impl ScoreRequest {
    pub fn new(disease_id: &str, features: &FeatureVector) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            request_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            disease_id: disease_id.to_string(),
            features: features.clone(),
        }
    }
}

/// Envelope for a scoring response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    /// Protocol version.
    pub version: String,
    /// Echoed request ID.
    pub request_id: String,
    /// Whether scoring succeeded.
    pub success: bool,
    /// Error message if `success` is false.
    pub error: Option<String>,
    pub risk_score: Option<f64>,
    pub model_version: Option<String>,
}
