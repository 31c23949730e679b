//! The single writer. All mutations serialize through one mutex-guarded
//! connection, which keeps SQLite write contention out of the picture.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use helix_core::errors::HelixResult;

use super::pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> HelixResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| to_storage_err(format!("open writer {}: {e}", path.display())))?;
        pragmas::apply(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> HelixResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| to_storage_err(format!("open in-memory writer: {e}")))?;
        pragmas::apply_in_memory(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure against the write connection, holding the write lock
    /// for its duration.
    pub fn with_conn_sync<F, T>(&self, f: F) -> HelixResult<T>
    where
        F: FnOnce(&Connection) -> HelixResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("write connection mutex poisoned"))?;
        f(&guard)
    }
}
