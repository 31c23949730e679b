//! PredictionRouter — consent check, feature build, dispatch with bounded
//! retry, terminal-state persistence.

use std::collections::HashMap;
use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use helix_consent::ConsentLedger;
use helix_core::config::HelixConfig;
use helix_core::constants::FEATURE_ML_PREDICTION;
use helix_core::errors::{ConsentError, HelixError, HelixResult, RouterError, ScoringError};
use helix_core::models::{
    FeatureVector, GenomicUpload, PredictionResult, ResultStatus, RiskScore, UploadStatus,
};
use helix_core::traits::{IConsentStore, IResultStore, IUploadStore};
use helix_scoring::{FeatureSpec, ScorerRegistry};

use crate::state::{RequestState, RetryPolicy};

/// The orchestration core. Single writer of `PredictionResult`.
pub struct PredictionRouter<C, U, R>
where
    C: IConsentStore,
    U: IUploadStore,
    R: IResultStore,
{
    consent: ConsentLedger<C>,
    uploads: U,
    results: R,
    registry: ScorerRegistry,
    specs: HashMap<String, FeatureSpec>,
    policy: RetryPolicy,
}

impl<C, U, R> PredictionRouter<C, U, R>
where
    C: IConsentStore,
    U: IUploadStore,
    R: IResultStore,
{
    pub fn new(
        consent: ConsentLedger<C>,
        uploads: U,
        results: R,
        registry: ScorerRegistry,
        config: &HelixConfig,
    ) -> Self {
        Self {
            consent,
            uploads,
            results,
            registry,
            specs: FeatureSpec::defaults(),
            policy: RetryPolicy::from_config(&config.router),
        }
    }

    /// Replace the per-disease feature specs.
    pub fn with_feature_specs(mut self, specs: HashMap<String, FeatureSpec>) -> Self {
        self.specs = specs;
        self
    }

    /// Route one prediction request through the state machine.
    ///
    /// Ok only for a completed prediction. Consent denial, incomplete
    /// data, inference rejection, and retry exhaustion come back as typed
    /// errors — each of those also persists its terminal result row, so
    /// the outcome is always traceable. Requests that cannot even be
    /// addressed (unknown upload, unknown disease) error without a row.
    pub fn route(
        &self,
        user_id: &str,
        disease_id: &str,
        upload_id: &str,
    ) -> HelixResult<PredictionResult> {
        let span = tracing::info_span!("helix.route", user_id, disease_id, upload_id);
        let _enter = span.enter();
        let mut state = RequestState::Requested;

        // Consent is read fresh on every request; a revocation takes
        // effect on the next call, never lazily.
        let consent_version = match self
            .consent
            .current_version(user_id, FEATURE_ML_PREDICTION)?
        {
            Some(version) => version,
            None => {
                tracing::info!(from = %state, "consent missing, request denied");
                self.persist_terminal(
                    user_id,
                    disease_id,
                    None,
                    ResultStatus::Failed,
                    None,
                    Some("consent required".to_string()),
                )?;
                return Err(ConsentError::Required {
                    feature_id: FEATURE_ML_PREDICTION.to_string(),
                }
                .into());
            }
        };
        state = RequestState::ConsentChecked {
            consent_version: consent_version.clone(),
        };
        tracing::debug!(state = %state, "consent verified");

        let upload = self.load_upload(upload_id)?;
        let scorer = self.registry.get(disease_id)?;
        let features = match self.build_features(disease_id, &upload) {
            Ok(features) => features,
            Err(err) => {
                self.persist_terminal(
                    user_id,
                    disease_id,
                    None,
                    ResultStatus::Failed,
                    Some(&consent_version),
                    Some(err.to_string()),
                )?;
                return Err(err);
            }
        };

        state = RequestState::Dispatched;
        tracing::debug!(state = %state, features = features.len(), "dispatching");

        let started = Instant::now();
        let mut attempts_made: u32 = 0;
        loop {
            match scorer.score(&features) {
                Ok(output) => {
                    let result = self.persist_terminal(
                        user_id,
                        disease_id,
                        Some((output.risk_score, output.model_version)),
                        ResultStatus::Completed,
                        Some(&consent_version),
                        None,
                    )?;
                    tracing::info!(
                        result_id = %result.id,
                        risk_score = %output.risk_score,
                        state = %RequestState::Completed,
                        "prediction completed"
                    );
                    return Ok(result);
                }
                Err(ScoringError::Inference { reason, .. }) => {
                    // The model rejected the input. Permanent; no retry.
                    self.persist_terminal(
                        user_id,
                        disease_id,
                        None,
                        ResultStatus::Failed,
                        Some(&consent_version),
                        Some(reason.clone()),
                    )?;
                    return Err(ScoringError::Inference {
                        disease_id: disease_id.to_string(),
                        reason,
                    }
                    .into());
                }
                Err(ScoringError::Unavailable { reason, .. }) => {
                    attempts_made += 1;
                    if self.policy.allows_retry(attempts_made, started.elapsed()) {
                        let delay = self.policy.backoff_before(attempts_made);
                        tracing::warn!(
                            attempt = attempts_made,
                            backoff_ms = delay.as_millis() as u64,
                            reason = %reason,
                            "scorer unavailable, backing off"
                        );
                        std::thread::sleep(delay);
                        continue;
                    }
                    self.persist_terminal(
                        user_id,
                        disease_id,
                        None,
                        ResultStatus::Unavailable,
                        Some(&consent_version),
                        Some(reason.clone()),
                    )?;
                    tracing::warn!(
                        attempts = attempts_made,
                        state = %RequestState::Unavailable,
                        "retry budget exhausted"
                    );
                    return Err(RouterError::Unavailable {
                        disease_id: disease_id.to_string(),
                        attempts: attempts_made,
                        reason,
                    }
                    .into());
                }
                Err(other) => {
                    // UnknownDisease/WeightsLoad cannot come out of a
                    // registered scorer's score call, but classify them
                    // as permanent if they ever do.
                    self.persist_terminal(
                        user_id,
                        disease_id,
                        None,
                        ResultStatus::Failed,
                        Some(&consent_version),
                        Some(other.to_string()),
                    )?;
                    return Err(other.into());
                }
            }
        }
    }

    /// Route the same upload to several diseases concurrently. Each
    /// disease is dispatched, retried, and classified independently; one
    /// pipeline's failure never blocks or rolls back another's.
    pub fn route_many(
        &self,
        user_id: &str,
        upload_id: &str,
        disease_ids: &[String],
    ) -> Vec<(String, HelixResult<PredictionResult>)> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = disease_ids
                .iter()
                .map(|disease_id| {
                    let disease_id = disease_id.clone();
                    scope.spawn(move || {
                        let outcome = self.route(user_id, &disease_id, upload_id);
                        (disease_id, outcome)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(pair) => pair,
                    Err(_) => (
                        String::new(),
                        Err(HelixError::Router(RouterError::Unavailable {
                            disease_id: String::new(),
                            attempts: 0,
                            reason: "dispatch thread panicked".to_string(),
                        })),
                    ),
                })
                .collect()
        })
    }

    fn load_upload(&self, upload_id: &str) -> HelixResult<GenomicUpload> {
        let upload = self
            .uploads
            .get_upload(upload_id)?
            .ok_or_else(|| RouterError::UploadNotFound {
                upload_id: upload_id.to_string(),
            })?;
        if upload.status != UploadStatus::Validated {
            return Err(RouterError::UploadNotValidated {
                upload_id: upload_id.to_string(),
                status: upload.status.as_str().to_string(),
            }
            .into());
        }
        Ok(upload)
    }

    fn build_features(
        &self,
        disease_id: &str,
        upload: &GenomicUpload,
    ) -> HelixResult<FeatureVector> {
        let spec = self
            .specs
            .get(disease_id)
            .ok_or_else(|| ScoringError::UnknownDisease {
                disease_id: disease_id.to_string(),
            })?;
        spec.build(upload)
    }

    fn persist_terminal(
        &self,
        user_id: &str,
        disease_id: &str,
        score: Option<(RiskScore, String)>,
        status: ResultStatus,
        consent_version: Option<&str>,
        failure_reason: Option<String>,
    ) -> HelixResult<PredictionResult> {
        let (risk_score, model_version) = match score {
            Some((score, version)) => (Some(score), Some(version)),
            None => (None, None),
        };
        let result = PredictionResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            disease_id: disease_id.to_string(),
            model_version,
            risk_score,
            risk_class: risk_score.map(|s| s.class()),
            consent_version_used: consent_version.map(|v| v.to_string()),
            status,
            failure_reason,
            created_at: Utc::now(),
        };
        self.results.insert_result(&result)?;
        Ok(result)
    }
}
