//! ReportAssembler — compiles the latest prediction/alert state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use helix_core::errors::HelixResult;
use helix_core::models::{ResultStatus, RiskClass, Severity};
use helix_core::traits::{IAlertStore, IResultStore, IUploadStore, ReportRenderer};

use crate::recommendations::recommendations_for;

/// One disease's latest assessment in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseAssessment {
    pub disease_id: String,
    pub status: ResultStatus,
    pub risk_score: Option<f64>,
    pub risk_class: Option<RiskClass>,
    pub model_version: Option<String>,
    pub consent_version_used: Option<String>,
    pub assessed_at: DateTime<Utc>,
    pub recommendations: Vec<String>,
}

/// Open alert summary line in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertLine {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// The assembled document. Serializable as-is; rendering to PDF or
/// anything else happens behind `ReportRenderer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub user_id: String,
    pub generated_at: DateTime<Utc>,
    pub upload_count: usize,
    pub assessments: Vec<DiseaseAssessment>,
    pub open_alerts: Vec<AlertLine>,
}

/// Read-only assembler over the result, alert, and upload stores.
pub struct ReportAssembler<R, A, U>
where
    R: IResultStore,
    A: IAlertStore,
    U: IUploadStore,
{
    results: R,
    alerts: A,
    uploads: U,
}

impl<R, A, U> ReportAssembler<R, A, U>
where
    R: IResultStore,
    A: IAlertStore,
    U: IUploadStore,
{
    pub fn new(results: R, alerts: A, uploads: U) -> Self {
        Self {
            results,
            alerts,
            uploads,
        }
    }

    /// Compile the latest result per disease plus open alerts.
    pub fn assemble(&self, user_id: &str) -> HelixResult<RiskReport> {
        let latest = self.results.latest_per_disease(user_id)?;
        let assessments = latest
            .into_iter()
            .map(|result| {
                let recommendations = result
                    .risk_class
                    .map(|class| recommendations_for(&result.disease_id, class))
                    .unwrap_or_default();
                DiseaseAssessment {
                    disease_id: result.disease_id,
                    status: result.status,
                    risk_score: result.risk_score.map(|s| s.value()),
                    risk_class: result.risk_class,
                    model_version: result.model_version,
                    consent_version_used: result.consent_version_used,
                    assessed_at: result.created_at,
                    recommendations,
                }
            })
            .collect();

        let open_alerts = self
            .alerts
            .unacknowledged_for_user(user_id)?
            .into_iter()
            .map(|alert| AlertLine {
                id: alert.id,
                message: alert.message,
                severity: alert.severity,
                created_at: alert.created_at,
            })
            .collect();

        Ok(RiskReport {
            user_id: user_id.to_string(),
            generated_at: Utc::now(),
            upload_count: self.uploads.uploads_for_user(user_id)?.len(),
            assessments,
            open_alerts,
        })
    }

    /// Assemble and hand off to a renderer.
    pub fn export(&self, user_id: &str, renderer: &dyn ReportRenderer) -> HelixResult<Vec<u8>> {
        let report = self.assemble(user_id)?;
        let document = serde_json::to_value(&report).map_err(|e| {
            helix_core::errors::StorageError::Serialization {
                message: format!("report: {e}"),
            }
        })?;
        renderer.render(&document)
    }
}
