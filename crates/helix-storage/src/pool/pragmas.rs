//! Startup pragma configuration for every connection.

use rusqlite::Connection;

use helix_core::errors::HelixResult;

use crate::to_storage_err;

/// Apply pragmas to a file-backed connection: WAL for concurrent readers,
/// NORMAL sync (safe under WAL), foreign keys on, busy timeout so writer
/// contention surfaces as a wait instead of an immediate error.
pub fn apply(conn: &Connection) -> HelixResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .map_err(|e| to_storage_err(format!("apply pragmas: {e}")))
}

/// Pragmas for in-memory connections (no WAL, it is meaningless there).
pub fn apply_in_memory(conn: &Connection) -> HelixResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| to_storage_err(format!("apply pragmas: {e}")))
}
