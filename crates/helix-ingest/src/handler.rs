//! UploadHandler — validation + registration. Failures are persisted as
//! `Failed` rows (retained for audit) and also returned to the caller.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use helix_core::errors::{HelixResult, UploadError};
use helix_core::models::{GenomicUpload, MetadataValue, UploadFormat, UploadStatus};
use helix_core::traits::IUploadStore;

/// The upload handler. Owns `GenomicUpload` creation; purely structural
/// validation plus storage registration.
pub struct UploadHandler<S: IUploadStore> {
    store: S,
}

impl<S: IUploadStore> UploadHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and register an uploaded file.
    ///
    /// On success the upload is persisted as `Validated` with extracted
    /// metadata. On validation failure a `Failed` row with the reason is
    /// persisted anyway and the error is returned to the caller.
    pub fn register(
        &self,
        user_id: &str,
        filename: &str,
        bytes: &[u8],
        declared_format: UploadFormat,
    ) -> HelixResult<GenomicUpload> {
        let checksum = blake3::hash(bytes).to_hex().to_string();

        if bytes.is_empty() {
            let err = UploadError::EmptyFile {
                filename: filename.to_string(),
            };
            self.persist_failed(user_id, filename, bytes, &checksum, declared_format, &err)?;
            return Err(err.into());
        }

        if let Some(from_name) = UploadFormat::from_filename(filename) {
            if from_name != declared_format {
                let err = UploadError::FormatMismatch {
                    declared: declared_format.to_string(),
                    reason: format!("filename '{filename}' suggests {from_name}"),
                };
                self.persist_failed(user_id, filename, bytes, &checksum, declared_format, &err)?;
                return Err(err.into());
            }
        }

        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => {
                let err = UploadError::UnsupportedFormat {
                    filename: filename.to_string(),
                    reason: "file is not valid UTF-8 text".to_string(),
                };
                self.persist_failed(user_id, filename, bytes, &checksum, declared_format, &err)?;
                return Err(err.into());
            }
        };

        let parsed = match declared_format {
            UploadFormat::Vcf => crate::vcf::extract_metadata(text),
            UploadFormat::Fastq => crate::fastq::extract_metadata(text),
        };
        let mut metadata = match parsed {
            Ok(metadata) => metadata,
            Err(reason) => {
                let err = UploadError::UnsupportedFormat {
                    filename: filename.to_string(),
                    reason,
                };
                self.persist_failed(user_id, filename, bytes, &checksum, declared_format, &err)?;
                return Err(err.into());
            }
        };

        // Same bytes uploaded before by this user: keep the new row (audit
        // trail) but point at the original.
        if let Some(original_id) = self.store.find_by_checksum(user_id, &checksum)? {
            metadata.insert(
                "duplicate_of".to_string(),
                MetadataValue::Text(original_id),
            );
        }

        let upload = GenomicUpload {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            filename: filename.to_string(),
            format: declared_format,
            size_bytes: bytes.len() as u64,
            checksum,
            metadata,
            status: UploadStatus::Validated,
            failure_reason: None,
            created_at: Utc::now(),
        };
        self.store.insert_upload(&upload)?;
        tracing::info!(
            upload_id = %upload.id,
            user_id,
            format = %upload.format,
            size_bytes = upload.size_bytes,
            "upload validated"
        );
        Ok(upload)
    }

    fn persist_failed(
        &self,
        user_id: &str,
        filename: &str,
        bytes: &[u8],
        checksum: &str,
        format: UploadFormat,
        err: &UploadError,
    ) -> HelixResult<()> {
        let upload = GenomicUpload {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            filename: filename.to_string(),
            format,
            size_bytes: bytes.len() as u64,
            checksum: checksum.to_string(),
            metadata: BTreeMap::new(),
            status: UploadStatus::Failed,
            failure_reason: Some(err.to_string()),
            created_at: Utc::now(),
        };
        self.store.insert_upload(&upload)?;
        tracing::warn!(upload_id = %upload.id, user_id, error = %err, "upload rejected");
        Ok(())
    }
}
