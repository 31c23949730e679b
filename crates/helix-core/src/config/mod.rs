//! Configuration structs. Serde-deserializable with full defaults, so an
//! empty TOML file yields a working pipeline.

pub mod alert_config;
pub mod defaults;
pub mod router_config;
pub mod scoring_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use alert_config::AlertConfig;
pub use router_config::RouterConfig;
pub use scoring_config::ScoringConfig;

use crate::errors::{HelixResult, StorageError};

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HelixConfig {
    pub router: RouterConfig,
    pub scoring: ScoringConfig,
    pub alerts: AlertConfig,
}

impl HelixConfig {
    /// Parse from TOML text. Unknown keys are ignored; missing keys take
    /// their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &Path) -> HelixResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| StorageError::Config {
            message: format!("read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&text).map_err(|e| {
            StorageError::Config {
                message: format!("parse {}: {e}", path.display()),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = HelixConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.router.max_attempts, defaults::DEFAULT_MAX_ATTEMPTS);
        assert_eq!(cfg.scoring.call_timeout_ms, defaults::DEFAULT_CALL_TIMEOUT_MS);
    }

    #[test]
    fn partial_toml_overrides() {
        let cfg = HelixConfig::from_toml_str("[router]\nmax_attempts = 5\n").unwrap();
        assert_eq!(cfg.router.max_attempts, 5);
        assert_eq!(cfg.router.base_backoff_ms, defaults::DEFAULT_BASE_BACKOFF_MS);
    }
}
