use serde::{Deserialize, Serialize};

use super::defaults;

/// Prediction router retry/backoff configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Bounded attempt count for an unavailable model service.
    pub max_attempts: u32,
    /// First backoff delay (ms); doubles per subsequent attempt.
    pub base_backoff_ms: u64,
    /// Cap on total elapsed time across all attempts (ms); exceeding it
    /// abandons the request as unavailable regardless of attempts left.
    pub max_elapsed_ms: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            base_backoff_ms: defaults::DEFAULT_BASE_BACKOFF_MS,
            max_elapsed_ms: defaults::DEFAULT_MAX_ELAPSED_MS,
        }
    }
}
