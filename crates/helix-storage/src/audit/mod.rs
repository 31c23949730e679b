//! Audit trail for consent and artifact mutations. Rows are written on the
//! same connection (and transaction) as the mutation they describe.

use rusqlite::{params, Connection};

use helix_core::errors::HelixResult;

use crate::to_storage_err;

pub struct AuditLogger;

impl AuditLogger {
    pub fn log(
        conn: &Connection,
        entity: &str,
        entity_id: &str,
        operation: &str,
        details: &serde_json::Value,
    ) -> HelixResult<()> {
        conn.execute(
            "INSERT INTO audit_log (entity, entity_id, operation, details)
             VALUES (?1, ?2, ?3, ?4)",
            params![entity, entity_id, operation, details.to_string()],
        )
        .map_err(|e| to_storage_err(format!("audit insert: {e}")))?;
        Ok(())
    }

    /// All audit rows for one entity, oldest first.
    pub fn entries_for(
        conn: &Connection,
        entity: &str,
        entity_id: &str,
    ) -> HelixResult<Vec<(String, String)>> {
        let mut stmt = conn
            .prepare(
                "SELECT operation, timestamp FROM audit_log
                 WHERE entity = ?1 AND entity_id = ?2 ORDER BY id",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params![entity, entity_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| to_storage_err(e.to_string()))?);
        }
        Ok(out)
    }
}
