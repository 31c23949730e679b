//! v002: consent_records.
//!
//! The partial unique index is the storage-level backstop for the ledger's
//! one-active-record invariant: even a bug in key serialization cannot
//! commit two active grants for the same (user, feature).

use rusqlite::Connection;

use helix_core::errors::HelixResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> HelixResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS consent_records (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            feature_id  TEXT NOT NULL,
            version     TEXT NOT NULL,
            granted     INTEGER NOT NULL DEFAULT 1,
            granted_at  TEXT NOT NULL,
            revoked_at  TEXT
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_consent_one_active
            ON consent_records(user_id, feature_id)
            WHERE granted = 1 AND revoked_at IS NULL;

        CREATE INDEX IF NOT EXISTS idx_consent_key ON consent_records(user_id, feature_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
