//! ScorerRegistry — disease_id → scorer instance. Diseases are data, not
//! compile-time variants; adding one is a registration, not a rebuild.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use helix_core::config::ScoringConfig;
use helix_core::errors::ScoringError;
use helix_core::traits::RiskScorer;

use crate::transport::HttpScorer;

/// Thread-safe scorer registry.
pub struct ScorerRegistry {
    scorers: DashMap<String, Arc<dyn RiskScorer>>,
}

impl ScorerRegistry {
    pub fn new() -> Self {
        Self {
            scorers: DashMap::new(),
        }
    }

    /// Build a registry of HTTP scorers from config, one per endpoint.
    /// Any scorer that cannot be constructed fails the whole boot.
    pub fn from_config(config: &ScoringConfig) -> Result<Self, ScoringError> {
        let registry = Self::new();
        let timeout = Duration::from_millis(config.call_timeout_ms);
        for (disease_id, endpoint) in &config.endpoints {
            let scorer = HttpScorer::new(disease_id.clone(), endpoint.clone(), timeout)?;
            registry.register(Arc::new(scorer));
        }
        Ok(registry)
    }

    /// Register a scorer under its own disease id, replacing any previous
    /// registration.
    pub fn register(&self, scorer: Arc<dyn RiskScorer>) {
        self.scorers.insert(scorer.disease_id().to_string(), scorer);
    }

    /// Look up the scorer for a disease.
    pub fn get(&self, disease_id: &str) -> Result<Arc<dyn RiskScorer>, ScoringError> {
        self.scorers
            .get(disease_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ScoringError::UnknownDisease {
                disease_id: disease_id.to_string(),
            })
    }

    /// All registered disease ids.
    pub fn disease_ids(&self) -> Vec<String> {
        self.scorers.iter().map(|e| e.key().clone()).collect()
    }
}

impl Default for ScorerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalScorer;

    #[test]
    fn unknown_disease_is_an_error() {
        let registry = ScorerRegistry::new();
        let err = registry.get("parkinsons").unwrap_err();
        assert!(matches!(err, ScoringError::UnknownDisease { .. }));
    }

    #[test]
    fn register_and_get() {
        let registry = ScorerRegistry::new();
        let scorer = LocalScorer::load("diabetes", vec![0.1], 0.0, "v1").unwrap();
        registry.register(Arc::new(scorer));
        assert_eq!(registry.get("diabetes").unwrap().disease_id(), "diabetes");
        assert_eq!(registry.disease_ids(), vec!["diabetes".to_string()]);
    }
}
