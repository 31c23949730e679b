use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Genomic file formats the upload handler understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadFormat {
    Vcf,
    Fastq,
}

impl UploadFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadFormat::Vcf => "vcf",
            UploadFormat::Fastq => "fastq",
        }
    }

    /// Infer the declared format from a filename extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".vcf") {
            Some(UploadFormat::Vcf)
        } else if lower.ends_with(".fastq") || lower.ends_with(".fq") {
            Some(UploadFormat::Fastq)
        } else {
            None
        }
    }
}

impl fmt::Display for UploadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of an upload. `Registered` is the pre-validation state;
/// rows never leave `Validated`/`Failed` once written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Registered,
    Validated,
    Failed,
}

impl UploadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadStatus::Registered => "registered",
            UploadStatus::Validated => "validated",
            UploadStatus::Failed => "failed",
        }
    }
}

impl std::str::FromStr for UploadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(UploadStatus::Registered),
            "validated" => Ok(UploadStatus::Validated),
            "failed" => Ok(UploadStatus::Failed),
            other => Err(format!("unknown upload status: {other}")),
        }
    }
}

/// Scalar metadata value extracted from a genomic file. Structural only —
/// never clinical interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl MetadataValue {
    /// Numeric view, used when building feature vectors.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Int(v) => Some(*v as f64),
            MetadataValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::Text(v.to_string())
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Int(v)
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        MetadataValue::Float(v)
    }
}

/// A registered genomic artifact. Owned by the upload handler; immutable
/// after validation; read-only everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomicUpload {
    /// UUID v4 identifier.
    pub id: String,
    pub user_id: String,
    pub filename: String,
    pub format: UploadFormat,
    pub size_bytes: u64,
    /// blake3 hex digest of the raw bytes.
    pub checksum: String,
    /// Structural metadata (record counts, reference build, ...).
    pub metadata: BTreeMap<String, MetadataValue>,
    pub status: UploadStatus,
    /// Human-readable reason when `status == Failed`. Failed rows are
    /// retained for audit, never deleted.
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
