//! v001: genomic_uploads.

use rusqlite::Connection;

use helix_core::errors::HelixResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> HelixResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS genomic_uploads (
            id              TEXT PRIMARY KEY,
            user_id         TEXT NOT NULL,
            filename        TEXT NOT NULL,
            format          TEXT NOT NULL,
            size_bytes      INTEGER NOT NULL,
            checksum        TEXT NOT NULL,
            metadata        TEXT NOT NULL DEFAULT '{}',
            status          TEXT NOT NULL,
            failure_reason  TEXT,
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_uploads_user ON genomic_uploads(user_id);
        CREATE INDEX IF NOT EXISTS idx_uploads_checksum ON genomic_uploads(user_id, checksum);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
