//! v004: audit_log.

use rusqlite::Connection;

use helix_core::errors::HelixResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> HelixResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS audit_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            entity      TEXT NOT NULL,
            entity_id   TEXT NOT NULL,
            operation   TEXT NOT NULL,
            details     TEXT NOT NULL DEFAULT '{}',
            actor       TEXT NOT NULL DEFAULT 'system',
            timestamp   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_audit_entity ON audit_log(entity, entity_id);
        CREATE INDEX IF NOT EXISTS idx_audit_timestamp ON audit_log(timestamp);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
