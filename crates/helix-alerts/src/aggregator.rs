//! AlertAggregator — result→alert derivation over an `IAlertStore`.

use chrono::Utc;
use uuid::Uuid;

use helix_core::config::AlertConfig;
use helix_core::errors::HelixResult;
use helix_core::models::{Alert, PredictionResult, ResultStatus, RiskClass, Severity};
use helix_core::traits::IAlertStore;

use crate::messages::alert_message;

/// Derives alerts from prediction results. Owns `Alert` creation; reads
/// results by reference only.
pub struct AlertAggregator<S: IAlertStore> {
    store: S,
    config: AlertConfig,
}

impl<S: IAlertStore> AlertAggregator<S> {
    pub fn new(store: S, config: AlertConfig) -> Self {
        Self { store, config }
    }

    /// React to a prediction result. Returns the created alert, or None
    /// when the result does not warrant one (low risk, non-completed
    /// status, or an alert already exists for this result).
    ///
    /// Idempotent per `prediction_result_id`: the existence lookup plus
    /// the unique index in storage make re-delivery harmless.
    pub fn on_result(&self, result: &PredictionResult) -> HelixResult<Option<Alert>> {
        // Failed/unavailable results are operational errors, not health
        // alerts; they surface through the prediction boundary instead.
        if result.status != ResultStatus::Completed {
            return Ok(None);
        }
        let severity = match result.risk_class {
            Some(RiskClass::High) => Severity::Critical,
            Some(RiskClass::Moderate) if self.config.warn_on_moderate => Severity::Warning,
            _ => return Ok(None),
        };

        if let Some(existing) = self.store.alert_for_result(&result.id)? {
            tracing::debug!(
                alert_id = %existing.id,
                result_id = %result.id,
                "alert already exists, skipping"
            );
            return Ok(None);
        }

        let alert = Alert {
            id: Uuid::new_v4().to_string(),
            user_id: result.user_id.clone(),
            prediction_result_id: result.id.clone(),
            message: alert_message(&result.disease_id, severity),
            severity,
            created_at: Utc::now(),
            acknowledged: false,
        };
        self.store.insert_alert(&alert)?;
        tracing::info!(
            alert_id = %alert.id,
            user_id = %alert.user_id,
            severity = severity.as_str(),
            "alert created"
        );
        Ok(Some(alert))
    }

    /// A user's open alerts, newest first.
    pub fn unacknowledged(&self, user_id: &str) -> HelixResult<Vec<Alert>> {
        self.store.unacknowledged_for_user(user_id)
    }

    /// Mark an alert acknowledged.
    pub fn acknowledge(&self, alert_id: &str) -> HelixResult<()> {
        self.store.acknowledge(alert_id)
    }
}
