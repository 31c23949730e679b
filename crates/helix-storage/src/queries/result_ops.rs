//! Prediction result persistence. Results are write-once: there is no
//! update path, by design.

use std::str::FromStr;

use rusqlite::{params, Connection, Row};

use helix_core::models::{PredictionResult, ResultStatus, RiskClass, RiskScore};
use helix_core::HelixResult;

use crate::audit::AuditLogger;
use crate::to_storage_err;

pub fn insert_result(conn: &Connection, result: &PredictionResult) -> HelixResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_result begin: {e}")))?;

    tx.execute(
        "INSERT INTO prediction_results (
            id, user_id, disease_id, model_version, risk_score, risk_class,
            consent_version_used, status, failure_reason, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            result.id,
            result.user_id,
            result.disease_id,
            result.model_version,
            result.risk_score.map(|s| s.value()),
            result.risk_class.map(|c| c.as_str()),
            result.consent_version_used,
            result.status.as_str(),
            result.failure_reason,
            result.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert_result: {e}")))?;

    AuditLogger::log(
        &tx,
        "prediction_result",
        &result.id,
        result.status.as_str(),
        &serde_json::json!({ "disease_id": result.disease_id }),
    )?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("insert_result commit: {e}")))?;
    Ok(())
}

pub fn get_result(conn: &Connection, id: &str) -> HelixResult<Option<PredictionResult>> {
    let mut stmt = conn
        .prepare("SELECT * FROM prediction_results WHERE id = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![id], row_to_result)
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

pub fn results_for_user(conn: &Connection, user_id: &str) -> HelixResult<Vec<PredictionResult>> {
    let mut stmt = conn
        .prepare(
            "SELECT * FROM prediction_results WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id], row_to_result)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(out)
}

/// Latest result per disease for this user. Rows come back newest first;
/// the first row seen per disease wins.
pub fn latest_per_disease(
    conn: &Connection,
    user_id: &str,
) -> HelixResult<Vec<PredictionResult>> {
    let all = results_for_user(conn, user_id)?;
    let mut seen = std::collections::HashSet::new();
    Ok(all
        .into_iter()
        .filter(|r| seen.insert(r.disease_id.clone()))
        .collect())
}

fn row_to_result(row: &Row<'_>) -> rusqlite::Result<PredictionResult> {
    let status: String = row.get("status")?;
    let risk_class: Option<String> = row.get("risk_class")?;
    let created_at: String = row.get("created_at")?;
    Ok(PredictionResult {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        disease_id: row.get("disease_id")?,
        model_version: row.get("model_version")?,
        risk_score: row.get::<_, Option<f64>>("risk_score")?.map(RiskScore::new),
        risk_class: risk_class.and_then(|c| RiskClass::from_str(&c).ok()),
        consent_version_used: row.get("consent_version_used")?,
        status: ResultStatus::from_str(&status).unwrap_or(ResultStatus::Failed),
        failure_reason: row.get("failure_reason")?,
        created_at: super::parse_timestamp(&created_at)?,
    })
}
