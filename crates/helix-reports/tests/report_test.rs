//! Assembler tests over in-memory storage: latest-state compilation and
//! renderer export.

use std::sync::Arc;

use chrono::Utc;
use helix_core::errors::HelixResult;
use helix_core::models::*;
use helix_core::traits::{IAlertStore, IResultStore, IUploadStore, ReportRenderer};
use helix_reports::ReportAssembler;
use helix_storage::StorageEngine;
use uuid::Uuid;

fn make_result(
    user_id: &str,
    disease_id: &str,
    score: f64,
    age_hours: i64,
) -> PredictionResult {
    let risk_score = RiskScore::new(score);
    PredictionResult {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        disease_id: disease_id.to_string(),
        model_version: Some("m-1.0".to_string()),
        risk_score: Some(risk_score),
        risk_class: Some(risk_score.class()),
        consent_version_used: Some("v1".to_string()),
        status: ResultStatus::Completed,
        failure_reason: None,
        created_at: Utc::now() - chrono::Duration::hours(age_hours),
    }
}

fn setup() -> (
    Arc<StorageEngine>,
    ReportAssembler<Arc<StorageEngine>, Arc<StorageEngine>, Arc<StorageEngine>>,
) {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    let assembler = ReportAssembler::new(engine.clone(), engine.clone(), engine.clone());
    (engine, assembler)
}

#[test]
fn report_contains_only_the_latest_result_per_disease() {
    let (engine, assembler) = setup();
    engine
        .insert_result(&make_result("user-1", "diabetes", 0.2, 48))
        .unwrap();
    engine
        .insert_result(&make_result("user-1", "diabetes", 0.82, 0))
        .unwrap();
    engine
        .insert_result(&make_result("user-1", "tumor", 0.1, 0))
        .unwrap();

    let report = assembler.assemble("user-1").unwrap();
    assert_eq!(report.user_id, "user-1");
    assert_eq!(report.assessments.len(), 2);

    let diabetes = report
        .assessments
        .iter()
        .find(|a| a.disease_id == "diabetes")
        .unwrap();
    assert_eq!(diabetes.risk_class, Some(RiskClass::High));
    assert_eq!(diabetes.risk_score, Some(0.82));
    assert_eq!(diabetes.consent_version_used.as_deref(), Some("v1"));
    assert!(!diabetes.recommendations.is_empty());
}

#[test]
fn report_includes_open_alerts_and_upload_count() {
    let (engine, assembler) = setup();
    let result = make_result("user-1", "diabetes", 0.82, 0);
    engine.insert_result(&result).unwrap();
    engine
        .insert_alert(&Alert {
            id: "al-1".to_string(),
            user_id: "user-1".to_string(),
            prediction_result_id: result.id.clone(),
            message: "High diabetes risk detected. Please consult your doctor.".to_string(),
            severity: Severity::Critical,
            created_at: Utc::now(),
            acknowledged: false,
        })
        .unwrap();
    engine
        .insert_upload(&GenomicUpload {
            id: "up-1".to_string(),
            user_id: "user-1".to_string(),
            filename: "sample.vcf".to_string(),
            format: UploadFormat::Vcf,
            size_bytes: 100,
            checksum: "chk".to_string(),
            metadata: Default::default(),
            status: UploadStatus::Validated,
            failure_reason: None,
            created_at: Utc::now(),
        })
        .unwrap();

    let report = assembler.assemble("user-1").unwrap();
    assert_eq!(report.upload_count, 1);
    assert_eq!(report.open_alerts.len(), 1);
    assert_eq!(report.open_alerts[0].severity, Severity::Critical);
}

#[test]
fn acknowledged_alerts_stay_out_of_the_report() {
    let (engine, assembler) = setup();
    engine
        .insert_alert(&Alert {
            id: "al-1".to_string(),
            user_id: "user-1".to_string(),
            prediction_result_id: "res-1".to_string(),
            message: "msg".to_string(),
            severity: Severity::Warning,
            created_at: Utc::now(),
            acknowledged: false,
        })
        .unwrap();
    engine.acknowledge("al-1").unwrap();

    let report = assembler.assemble("user-1").unwrap();
    assert!(report.open_alerts.is_empty());
}

#[test]
fn empty_history_yields_an_empty_report() {
    let (_engine, assembler) = setup();
    let report = assembler.assemble("user-1").unwrap();
    assert!(report.assessments.is_empty());
    assert!(report.open_alerts.is_empty());
    assert_eq!(report.upload_count, 0);
}

#[test]
fn failed_assessment_carries_no_recommendations() {
    let (engine, assembler) = setup();
    let mut result = make_result("user-1", "diabetes", 0.0, 0);
    result.status = ResultStatus::Failed;
    result.risk_score = None;
    result.risk_class = None;
    result.model_version = None;
    result.failure_reason = Some("consent required".to_string());
    engine.insert_result(&result).unwrap();

    let report = assembler.assemble("user-1").unwrap();
    assert_eq!(report.assessments.len(), 1);
    assert_eq!(report.assessments[0].status, ResultStatus::Failed);
    assert!(report.assessments[0].recommendations.is_empty());
}

/// Renders the document as pretty-printed JSON bytes.
struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, document: &serde_json::Value) -> HelixResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(document).unwrap_or_default())
    }
}

#[test]
fn export_round_trips_through_a_renderer() {
    let (engine, assembler) = setup();
    engine
        .insert_result(&make_result("user-1", "alzheimers", 0.7, 0))
        .unwrap();

    let bytes = assembler.export("user-1", &JsonRenderer).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["user_id"], "user-1");
    assert_eq!(value["assessments"][0]["disease_id"], "alzheimers");
    assert_eq!(value["assessments"][0]["risk_class"], "high");
}
