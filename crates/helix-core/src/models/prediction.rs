use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::risk::{RiskClass, RiskScore};

/// Transient routing input. Never persisted on its own — consumed by the
/// router, which records the outcome as a `PredictionResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub user_id: String,
    pub disease_id: String,
    pub upload_id: String,
    /// Consent version captured at check time; `None` until checked.
    pub consent_version: Option<String>,
}

impl PredictionRequest {
    pub fn new(
        user_id: impl Into<String>,
        disease_id: impl Into<String>,
        upload_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            disease_id: disease_id.into(),
            upload_id: upload_id.into(),
            consent_version: None,
        }
    }
}

/// Terminal classification of a routing attempt.
///
/// `Failed` means the model rejected the input (permanent, caller error);
/// `Unavailable` means the model could not be reached within the retry
/// budget (transient, caller should retry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Completed,
    Failed,
    Unavailable,
}

impl ResultStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultStatus::Completed => "completed",
            ResultStatus::Failed => "failed",
            ResultStatus::Unavailable => "unavailable",
        }
    }
}

impl std::str::FromStr for ResultStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(ResultStatus::Completed),
            "failed" => Ok(ResultStatus::Failed),
            "unavailable" => Ok(ResultStatus::Unavailable),
            other => Err(format!("unknown result status: {other}")),
        }
    }
}

/// Outcome of one routing attempt. Written exactly once by the router
/// (single writer), immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// UUID v4 identifier.
    pub id: String,
    pub user_id: String,
    pub disease_id: String,
    /// Version reported by the scorer; empty marker for non-completed rows.
    pub model_version: Option<String>,
    pub risk_score: Option<RiskScore>,
    pub risk_class: Option<RiskClass>,
    /// The consent version read at check time. A later revocation does not
    /// rewrite history: this records what was authorized at decision time.
    pub consent_version_used: Option<String>,
    pub status: ResultStatus,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
