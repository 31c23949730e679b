use chrono::{DateTime, Utc};

use crate::errors::HelixResult;
use crate::models::{Alert, ConsentRecord, GenomicUpload, PredictionResult};

/// Persistence for genomic uploads. The upload handler is the only writer.
pub trait IUploadStore: Send + Sync {
    fn insert_upload(&self, upload: &GenomicUpload) -> HelixResult<()>;
    fn get_upload(&self, id: &str) -> HelixResult<Option<GenomicUpload>>;
    fn uploads_for_user(&self, user_id: &str) -> HelixResult<Vec<GenomicUpload>>;
    /// Earliest upload id for this user with the given checksum, if any.
    /// Used for duplicate detection at registration time.
    fn find_by_checksum(&self, user_id: &str, checksum: &str) -> HelixResult<Option<String>>;
}

/// Persistence for consent records. The ledger is the only writer; the
/// supersede-and-insert must happen in one transaction.
pub trait IConsentStore: Send + Sync {
    /// Revoke any active record for the key and insert the new grant,
    /// atomically. Returns the inserted record.
    fn upsert_grant(
        &self,
        user_id: &str,
        feature_id: &str,
        version: &str,
        granted_at: DateTime<Utc>,
    ) -> HelixResult<ConsentRecord>;
    /// Mark the active record revoked. Returns false if none was active.
    fn revoke(
        &self,
        user_id: &str,
        feature_id: &str,
        revoked_at: DateTime<Utc>,
    ) -> HelixResult<bool>;
    fn active_record(&self, user_id: &str, feature_id: &str)
        -> HelixResult<Option<ConsentRecord>>;
    /// Full history for a key, newest first. Superseded and revoked rows
    /// are retained for audit.
    fn history(&self, user_id: &str, feature_id: &str) -> HelixResult<Vec<ConsentRecord>>;
}

/// Persistence for prediction results. The router is the only writer.
pub trait IResultStore: Send + Sync {
    fn insert_result(&self, result: &PredictionResult) -> HelixResult<()>;
    fn get_result(&self, id: &str) -> HelixResult<Option<PredictionResult>>;
    fn results_for_user(&self, user_id: &str) -> HelixResult<Vec<PredictionResult>>;
    /// Latest result per disease for this user, any status.
    fn latest_per_disease(&self, user_id: &str) -> HelixResult<Vec<PredictionResult>>;
}

/// Persistence for alerts. The aggregator is the only writer.
pub trait IAlertStore: Send + Sync {
    fn insert_alert(&self, alert: &Alert) -> HelixResult<()>;
    fn alert_for_result(&self, prediction_result_id: &str) -> HelixResult<Option<Alert>>;
    fn unacknowledged_for_user(&self, user_id: &str) -> HelixResult<Vec<Alert>>;
    /// Mark an alert acknowledged. Unknown ids are a `NotFound` error.
    fn acknowledge(&self, alert_id: &str) -> HelixResult<()>;
}

// One storage engine usually backs several components; the blanket Arc
// impls let each own a handle without wrapper types.

impl<T: IUploadStore + ?Sized> IUploadStore for std::sync::Arc<T> {
    fn insert_upload(&self, upload: &GenomicUpload) -> HelixResult<()> {
        (**self).insert_upload(upload)
    }
    fn get_upload(&self, id: &str) -> HelixResult<Option<GenomicUpload>> {
        (**self).get_upload(id)
    }
    fn uploads_for_user(&self, user_id: &str) -> HelixResult<Vec<GenomicUpload>> {
        (**self).uploads_for_user(user_id)
    }
    fn find_by_checksum(&self, user_id: &str, checksum: &str) -> HelixResult<Option<String>> {
        (**self).find_by_checksum(user_id, checksum)
    }
}

impl<T: IConsentStore + ?Sized> IConsentStore for std::sync::Arc<T> {
    fn upsert_grant(
        &self,
        user_id: &str,
        feature_id: &str,
        version: &str,
        granted_at: DateTime<Utc>,
    ) -> HelixResult<ConsentRecord> {
        (**self).upsert_grant(user_id, feature_id, version, granted_at)
    }
    fn revoke(
        &self,
        user_id: &str,
        feature_id: &str,
        revoked_at: DateTime<Utc>,
    ) -> HelixResult<bool> {
        (**self).revoke(user_id, feature_id, revoked_at)
    }
    fn active_record(
        &self,
        user_id: &str,
        feature_id: &str,
    ) -> HelixResult<Option<ConsentRecord>> {
        (**self).active_record(user_id, feature_id)
    }
    fn history(&self, user_id: &str, feature_id: &str) -> HelixResult<Vec<ConsentRecord>> {
        (**self).history(user_id, feature_id)
    }
}

impl<T: IResultStore + ?Sized> IResultStore for std::sync::Arc<T> {
    fn insert_result(&self, result: &PredictionResult) -> HelixResult<()> {
        (**self).insert_result(result)
    }
    fn get_result(&self, id: &str) -> HelixResult<Option<PredictionResult>> {
        (**self).get_result(id)
    }
    fn results_for_user(&self, user_id: &str) -> HelixResult<Vec<PredictionResult>> {
        (**self).results_for_user(user_id)
    }
    fn latest_per_disease(&self, user_id: &str) -> HelixResult<Vec<PredictionResult>> {
        (**self).latest_per_disease(user_id)
    }
}

impl<T: IAlertStore + ?Sized> IAlertStore for std::sync::Arc<T> {
    fn insert_alert(&self, alert: &Alert) -> HelixResult<()> {
        (**self).insert_alert(alert)
    }
    fn alert_for_result(&self, prediction_result_id: &str) -> HelixResult<Option<Alert>> {
        (**self).alert_for_result(prediction_result_id)
    }
    fn unacknowledged_for_user(&self, user_id: &str) -> HelixResult<Vec<Alert>> {
        (**self).unacknowledged_for_user(user_id)
    }
    fn acknowledge(&self, alert_id: &str) -> HelixResult<()> {
        (**self).acknowledge(alert_id)
    }
}
