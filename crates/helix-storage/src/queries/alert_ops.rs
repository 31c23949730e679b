//! Alert persistence. The UNIQUE constraint on prediction_result_id is the
//! storage-level half of the aggregator's idempotence guarantee.

use std::str::FromStr;

use rusqlite::{params, Connection, Row};

use helix_core::errors::StorageError;
use helix_core::models::{Alert, Severity};
use helix_core::HelixResult;

use crate::to_storage_err;

pub fn insert_alert(conn: &Connection, alert: &Alert) -> HelixResult<()> {
    conn.execute(
        "INSERT INTO alerts (
            id, user_id, prediction_result_id, message, severity, created_at, acknowledged
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            alert.id,
            alert.user_id,
            alert.prediction_result_id,
            alert.message,
            alert.severity.as_str(),
            alert.created_at.to_rfc3339(),
            alert.acknowledged as i32,
        ],
    )
    .map_err(|e| to_storage_err(format!("insert_alert: {e}")))?;
    Ok(())
}

pub fn alert_for_result(
    conn: &Connection,
    prediction_result_id: &str,
) -> HelixResult<Option<Alert>> {
    let mut stmt = conn
        .prepare("SELECT * FROM alerts WHERE prediction_result_id = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![prediction_result_id], row_to_alert)
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

pub fn unacknowledged_for_user(conn: &Connection, user_id: &str) -> HelixResult<Vec<Alert>> {
    let mut stmt = conn
        .prepare(
            "SELECT * FROM alerts WHERE user_id = ?1 AND acknowledged = 0
             ORDER BY created_at DESC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id], row_to_alert)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(out)
}

pub fn acknowledge(conn: &Connection, alert_id: &str) -> HelixResult<()> {
    let changed = conn
        .execute(
            "UPDATE alerts SET acknowledged = 1 WHERE id = ?1",
            params![alert_id],
        )
        .map_err(|e| to_storage_err(format!("acknowledge: {e}")))?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            entity: "alert",
            id: alert_id.to_string(),
        }
        .into());
    }
    Ok(())
}

fn row_to_alert(row: &Row<'_>) -> rusqlite::Result<Alert> {
    let severity: String = row.get("severity")?;
    let created_at: String = row.get("created_at")?;
    Ok(Alert {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        prediction_result_id: row.get("prediction_result_id")?,
        message: row.get("message")?,
        severity: Severity::from_str(&severity).unwrap_or(Severity::Info),
        created_at: super::parse_timestamp(&created_at)?,
        acknowledged: row.get::<_, i64>("acknowledged")? != 0,
    })
}
