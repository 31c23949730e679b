use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Model service transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Per-call deadline for one model service invocation (ms).
    pub call_timeout_ms: u64,
    /// disease_id → endpoint URL for HTTP-backed scorers.
    pub endpoints: HashMap<String, String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: defaults::DEFAULT_CALL_TIMEOUT_MS,
            endpoints: HashMap::new(),
        }
    }
}
