//! Versioned schema migrations, gated on `PRAGMA user_version`.

mod v001_uploads;
mod v002_consent;
mod v003_results_alerts;
mod v004_audit;

use rusqlite::Connection;

use helix_core::errors::{HelixError, HelixResult, StorageError};

use crate::to_storage_err;

/// Latest schema version.
pub const SCHEMA_VERSION: u32 = 4;

/// Run all pending migrations in order, updating `user_version` after each.
pub fn run_migrations(conn: &Connection) -> HelixResult<()> {
    let current = schema_version(conn)?;
    let steps: &[(u32, fn(&Connection) -> HelixResult<()>)] = &[
        (1, v001_uploads::migrate),
        (2, v002_consent::migrate),
        (3, v003_results_alerts::migrate),
        (4, v004_audit::migrate),
    ];

    for (version, migrate) in steps {
        if current >= *version {
            continue;
        }
        migrate(conn).map_err(|e| {
            HelixError::from(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(format!("set user_version {version}: {e}")))?;
        tracing::debug!(version, "applied schema migration");
    }
    Ok(())
}

/// Current `user_version` of the database.
pub fn schema_version(conn: &Connection) -> HelixResult<u32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get::<_, u32>(0))
        .map_err(|e| to_storage_err(format!("read user_version: {e}")))
}
