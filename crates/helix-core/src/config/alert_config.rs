use serde::{Deserialize, Serialize};

/// Alert aggregator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Whether moderate-risk results raise a warning alert. High-risk
    /// results always raise a critical alert.
    pub warn_on_moderate: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { warn_on_moderate: true }
    }
}
