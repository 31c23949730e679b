use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-facing alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// A notification derived from a completed prediction result whose risk
/// class crossed the aggregator's threshold. At most one alert exists per
/// `prediction_result_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// UUID v4 identifier.
    pub id: String,
    pub user_id: String,
    pub prediction_result_id: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    pub acknowledged: bool,
}
