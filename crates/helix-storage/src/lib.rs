//! SQLite persistence for the Helix pipeline: connection pool, versioned
//! migrations, per-table query modules, and a same-transaction audit log.

pub mod audit;
pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use helix_core::errors::{HelixError, StorageError};

/// Map any stringly failure into the storage error variant.
pub(crate) fn to_storage_err(message: impl Into<String>) -> HelixError {
    StorageError::Sqlite {
        message: message.into(),
    }
    .into()
}
