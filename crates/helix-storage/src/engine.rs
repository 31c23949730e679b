//! StorageEngine — owns the ConnectionPool and implements every store
//! trait. Migrations run on open; shutdown needs no cleanup beyond drop.

use std::path::Path;

use chrono::{DateTime, Utc};

use helix_core::errors::HelixResult;
use helix_core::models::{Alert, ConsentRecord, GenomicUpload, PredictionResult};
use helix_core::traits::{IAlertStore, IConsentStore, IResultStore, IUploadStore};

use crate::migrations;
use crate::pool::ConnectionPool;

/// The main storage engine. Owns the connection pool and provides the
/// upload, consent, result, and alert store interfaces.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> HelixResult<Self> {
        let pool = ConnectionPool::open(path, 4)?;
        let engine = Self { pool, use_read_pool: true };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> HelixResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self { pool, use_read_pool: false };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> HelixResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    /// Get a reference to the connection pool (for advanced operations,
    /// e.g. reading the audit trail in tests).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> HelixResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> HelixResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IUploadStore for StorageEngine {
    fn insert_upload(&self, upload: &GenomicUpload) -> HelixResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::upload_ops::insert_upload(conn, upload))
    }

    fn get_upload(&self, id: &str) -> HelixResult<Option<GenomicUpload>> {
        self.with_reader(|conn| crate::queries::upload_ops::get_upload(conn, id))
    }

    fn uploads_for_user(&self, user_id: &str) -> HelixResult<Vec<GenomicUpload>> {
        self.with_reader(|conn| crate::queries::upload_ops::uploads_for_user(conn, user_id))
    }

    fn find_by_checksum(&self, user_id: &str, checksum: &str) -> HelixResult<Option<String>> {
        self.with_reader(|conn| {
            crate::queries::upload_ops::find_by_checksum(conn, user_id, checksum)
        })
    }
}

impl IConsentStore for StorageEngine {
    fn upsert_grant(
        &self,
        user_id: &str,
        feature_id: &str,
        version: &str,
        granted_at: DateTime<Utc>,
    ) -> HelixResult<ConsentRecord> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::consent_ops::upsert_grant(conn, user_id, feature_id, version, granted_at)
        })
    }

    fn revoke(
        &self,
        user_id: &str,
        feature_id: &str,
        revoked_at: DateTime<Utc>,
    ) -> HelixResult<bool> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::consent_ops::revoke(conn, user_id, feature_id, revoked_at)
        })
    }

    fn active_record(
        &self,
        user_id: &str,
        feature_id: &str,
    ) -> HelixResult<Option<ConsentRecord>> {
        // Consent reads go through the writer even in file-backed mode:
        // a grant committed a moment ago must be visible to the very next
        // is_active check, with no WAL read-snapshot lag.
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::consent_ops::active_record(conn, user_id, feature_id)
        })
    }

    fn history(&self, user_id: &str, feature_id: &str) -> HelixResult<Vec<ConsentRecord>> {
        self.with_reader(|conn| crate::queries::consent_ops::history(conn, user_id, feature_id))
    }
}

impl IResultStore for StorageEngine {
    fn insert_result(&self, result: &PredictionResult) -> HelixResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::result_ops::insert_result(conn, result))
    }

    fn get_result(&self, id: &str) -> HelixResult<Option<PredictionResult>> {
        self.with_reader(|conn| crate::queries::result_ops::get_result(conn, id))
    }

    fn results_for_user(&self, user_id: &str) -> HelixResult<Vec<PredictionResult>> {
        self.with_reader(|conn| crate::queries::result_ops::results_for_user(conn, user_id))
    }

    fn latest_per_disease(&self, user_id: &str) -> HelixResult<Vec<PredictionResult>> {
        self.with_reader(|conn| crate::queries::result_ops::latest_per_disease(conn, user_id))
    }
}

impl IAlertStore for StorageEngine {
    fn insert_alert(&self, alert: &Alert) -> HelixResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::alert_ops::insert_alert(conn, alert))
    }

    fn alert_for_result(&self, prediction_result_id: &str) -> HelixResult<Option<Alert>> {
        self.with_reader(|conn| {
            crate::queries::alert_ops::alert_for_result(conn, prediction_result_id)
        })
    }

    fn unacknowledged_for_user(&self, user_id: &str) -> HelixResult<Vec<Alert>> {
        self.with_reader(|conn| {
            crate::queries::alert_ops::unacknowledged_for_user(conn, user_id)
        })
    }

    fn acknowledge(&self, alert_id: &str) -> HelixResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::alert_ops::acknowledge(conn, alert_id))
    }
}
