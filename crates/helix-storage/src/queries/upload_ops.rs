//! Insert and lookup for genomic uploads.

use std::collections::BTreeMap;
use std::str::FromStr;

use rusqlite::{params, Connection, Row};

use helix_core::models::{GenomicUpload, MetadataValue, UploadFormat, UploadStatus};
use helix_core::HelixResult;

use crate::audit::AuditLogger;
use crate::to_storage_err;

/// Insert an upload row plus its audit entry, all-or-nothing.
pub fn insert_upload(conn: &Connection, upload: &GenomicUpload) -> HelixResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_upload begin: {e}")))?;

    let metadata_json =
        serde_json::to_string(&upload.metadata).map_err(|e| to_storage_err(e.to_string()))?;

    tx.execute(
        "INSERT INTO genomic_uploads (
            id, user_id, filename, format, size_bytes, checksum,
            metadata, status, failure_reason, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            upload.id,
            upload.user_id,
            upload.filename,
            upload.format.as_str(),
            upload.size_bytes,
            upload.checksum,
            metadata_json,
            upload.status.as_str(),
            upload.failure_reason,
            upload.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert_upload: {e}")))?;

    AuditLogger::log(
        &tx,
        "upload",
        &upload.id,
        upload.status.as_str(),
        &serde_json::json!({ "filename": upload.filename, "checksum": upload.checksum }),
    )?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("insert_upload commit: {e}")))?;
    Ok(())
}

pub fn get_upload(conn: &Connection, id: &str) -> HelixResult<Option<GenomicUpload>> {
    let mut stmt = conn
        .prepare("SELECT * FROM genomic_uploads WHERE id = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![id], row_to_upload)
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

pub fn uploads_for_user(conn: &Connection, user_id: &str) -> HelixResult<Vec<GenomicUpload>> {
    let mut stmt = conn
        .prepare("SELECT * FROM genomic_uploads WHERE user_id = ?1 ORDER BY created_at DESC")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id], row_to_upload)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(out)
}

/// Earliest upload id for this user with the given checksum.
pub fn find_by_checksum(
    conn: &Connection,
    user_id: &str,
    checksum: &str,
) -> HelixResult<Option<String>> {
    conn.query_row(
        "SELECT id FROM genomic_uploads
         WHERE user_id = ?1 AND checksum = ?2
         ORDER BY created_at, id LIMIT 1",
        params![user_id, checksum],
        |row| row.get::<_, String>(0),
    )
    .map(Some)
    .or_else(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => Ok(None),
        other => Err(to_storage_err(other.to_string())),
    })
}

fn row_to_upload(row: &Row<'_>) -> rusqlite::Result<GenomicUpload> {
    let format: String = row.get("format")?;
    let status: String = row.get("status")?;
    let metadata_json: String = row.get("metadata")?;
    let created_at: String = row.get("created_at")?;

    let metadata: BTreeMap<String, MetadataValue> =
        serde_json::from_str(&metadata_json).unwrap_or_default();

    Ok(GenomicUpload {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        filename: row.get("filename")?,
        format: match format.as_str() {
            "fastq" => UploadFormat::Fastq,
            _ => UploadFormat::Vcf,
        },
        size_bytes: row.get::<_, i64>("size_bytes")? as u64,
        checksum: row.get("checksum")?,
        metadata,
        status: UploadStatus::from_str(&status).unwrap_or(UploadStatus::Failed),
        failure_reason: row.get("failure_reason")?,
        created_at: super::parse_timestamp(&created_at)?,
    })
}
