//! Consent record mutations and lookups. The supersede-then-insert pair
//! runs in one transaction so there is no window with two active rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use helix_core::models::ConsentRecord;
use helix_core::HelixResult;

use crate::audit::AuditLogger;
use crate::to_storage_err;

/// Revoke any active record for the key and insert the new grant.
pub fn upsert_grant(
    conn: &Connection,
    user_id: &str,
    feature_id: &str,
    version: &str,
    granted_at: DateTime<Utc>,
) -> HelixResult<ConsentRecord> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("upsert_grant begin: {e}")))?;

    // Supersede: the prior grant is revoked at the instant the new one lands.
    tx.execute(
        "UPDATE consent_records SET revoked_at = ?3
         WHERE user_id = ?1 AND feature_id = ?2 AND granted = 1 AND revoked_at IS NULL",
        params![user_id, feature_id, granted_at.to_rfc3339()],
    )
    .map_err(|e| to_storage_err(format!("upsert_grant supersede: {e}")))?;

    tx.execute(
        "INSERT INTO consent_records (user_id, feature_id, version, granted, granted_at, revoked_at)
         VALUES (?1, ?2, ?3, 1, ?4, NULL)",
        params![user_id, feature_id, version, granted_at.to_rfc3339()],
    )
    .map_err(|e| to_storage_err(format!("upsert_grant insert: {e}")))?;

    AuditLogger::log(
        &tx,
        "consent",
        &format!("{user_id}/{feature_id}"),
        "grant",
        &serde_json::json!({ "version": version }),
    )?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("upsert_grant commit: {e}")))?;

    Ok(ConsentRecord {
        user_id: user_id.to_string(),
        feature_id: feature_id.to_string(),
        version: version.to_string(),
        granted: true,
        granted_at,
        revoked_at: None,
    })
}

/// Mark the active record revoked. Returns false if none was active.
pub fn revoke(
    conn: &Connection,
    user_id: &str,
    feature_id: &str,
    revoked_at: DateTime<Utc>,
) -> HelixResult<bool> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("revoke begin: {e}")))?;

    let changed = tx
        .execute(
            "UPDATE consent_records SET revoked_at = ?3
             WHERE user_id = ?1 AND feature_id = ?2 AND granted = 1 AND revoked_at IS NULL",
            params![user_id, feature_id, revoked_at.to_rfc3339()],
        )
        .map_err(|e| to_storage_err(format!("revoke: {e}")))?;

    if changed > 0 {
        AuditLogger::log(
            &tx,
            "consent",
            &format!("{user_id}/{feature_id}"),
            "revoke",
            &serde_json::json!({}),
        )?;
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("revoke commit: {e}")))?;
    Ok(changed > 0)
}

pub fn active_record(
    conn: &Connection,
    user_id: &str,
    feature_id: &str,
) -> HelixResult<Option<ConsentRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT * FROM consent_records
             WHERE user_id = ?1 AND feature_id = ?2 AND granted = 1 AND revoked_at IS NULL",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![user_id, feature_id], row_to_record)
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

/// Full history for a key, newest first.
pub fn history(
    conn: &Connection,
    user_id: &str,
    feature_id: &str,
) -> HelixResult<Vec<ConsentRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT * FROM consent_records
             WHERE user_id = ?1 AND feature_id = ?2 ORDER BY id DESC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id, feature_id], row_to_record)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(out)
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ConsentRecord> {
    let granted_at: String = row.get("granted_at")?;
    let revoked_at: Option<String> = row.get("revoked_at")?;
    Ok(ConsentRecord {
        user_id: row.get("user_id")?,
        feature_id: row.get("feature_id")?,
        version: row.get("version")?,
        granted: row.get::<_, i64>("granted")? != 0,
        granted_at: super::parse_timestamp(&granted_at)?,
        revoked_at: match revoked_at {
            Some(t) => Some(super::parse_timestamp(&t)?),
            None => None,
        },
    })
}
