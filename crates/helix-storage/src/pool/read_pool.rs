//! Round-robin pool of read-only connections.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use helix_core::errors::HelixResult;

use super::pragmas;
use crate::to_storage_err;

pub struct ReadPool {
    conns: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    pub fn open(path: &Path, size: usize) -> HelixResult<Self> {
        let size = size.max(1);
        let mut conns = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| to_storage_err(format!("open reader {}: {e}", path.display())))?;
            conn.execute_batch("PRAGMA busy_timeout = 5000;")
                .map_err(|e| to_storage_err(format!("reader pragmas: {e}")))?;
            conns.push(Mutex::new(conn));
        }
        Ok(Self {
            conns,
            next: AtomicUsize::new(0),
        })
    }

    /// In-memory readers are isolated databases; engines must route reads
    /// through the writer in this mode. Kept only so the pool shape is
    /// uniform.
    pub fn open_in_memory(size: usize) -> HelixResult<Self> {
        let size = size.max(1);
        let mut conns = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_in_memory()
                .map_err(|e| to_storage_err(format!("open in-memory reader: {e}")))?;
            pragmas::apply_in_memory(&conn)?;
            conns.push(Mutex::new(conn));
        }
        Ok(Self {
            conns,
            next: AtomicUsize::new(0),
        })
    }

    /// Run a closure against the next reader in round-robin order.
    pub fn with_conn<F, T>(&self, f: F) -> HelixResult<T>
    where
        F: FnOnce(&Connection) -> HelixResult<T>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.conns.len();
        let guard = self.conns[idx]
            .lock()
            .map_err(|_| to_storage_err("read connection mutex poisoned"))?;
        f(&guard)
    }
}
