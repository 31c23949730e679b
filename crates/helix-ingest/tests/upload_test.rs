//! Upload handler tests against real in-memory storage: validation
//! outcomes, retained failure rows, and duplicate detection.

use std::sync::Arc;

use helix_core::errors::{HelixError, UploadError};
use helix_core::models::{MetadataValue, UploadFormat, UploadStatus};
use helix_core::traits::IUploadStore;
use helix_ingest::UploadHandler;
use helix_storage::StorageEngine;

const SMALL_VCF: &str = "\
##fileformat=VCFv4.2
##reference=GRCh38
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSAMPLE1
chr1\t100\trs1\tA\tG\t50\tPASS\t.\tGT\t0/1
chr1\t200\trs2\tC\tT\t40\tq10\t.\tGT\t1/1
chr2\t300\trs3\tG\tA\t60\tPASS\t.\tGT\t0/1
";

const SMALL_FASTQ: &str = "\
@read1
ACGTACGT
+
IIIIIIII
@read2
ACGTAC
+
IIIIII
";

fn setup() -> (Arc<StorageEngine>, UploadHandler<Arc<StorageEngine>>) {
    let engine = Arc::new(StorageEngine::open_in_memory().unwrap());
    let handler = UploadHandler::new(engine.clone());
    (engine, handler)
}

#[test]
fn valid_vcf_registers_with_metadata() {
    let (engine, handler) = setup();
    let upload = handler
        .register("user-1", "sample.vcf", SMALL_VCF.as_bytes(), UploadFormat::Vcf)
        .unwrap();

    assert_eq!(upload.status, UploadStatus::Validated);
    assert_eq!(upload.metadata["variant_count"], MetadataValue::Int(3));
    assert_eq!(upload.metadata["pass_filter_count"], MetadataValue::Int(2));
    assert_eq!(upload.metadata["sample_count"], MetadataValue::Int(1));
    assert_eq!(
        upload.metadata["reference_build"],
        MetadataValue::Text("GRCh38".to_string())
    );

    // Persisted, not just returned.
    let stored = engine.get_upload(&upload.id).unwrap().expect("persisted");
    assert_eq!(stored.checksum, upload.checksum);
}

#[test]
fn valid_fastq_registers_with_read_stats() {
    let (_engine, handler) = setup();
    let upload = handler
        .register("user-1", "reads.fastq", SMALL_FASTQ.as_bytes(), UploadFormat::Fastq)
        .unwrap();

    assert_eq!(upload.metadata["read_count"], MetadataValue::Int(2));
    assert_eq!(upload.metadata["min_read_length"], MetadataValue::Int(6));
    assert_eq!(upload.metadata["max_read_length"], MetadataValue::Int(8));
}

#[test]
fn empty_file_fails_but_row_is_retained() {
    let (engine, handler) = setup();
    let err = handler
        .register("user-1", "empty.vcf", b"", UploadFormat::Vcf)
        .unwrap_err();
    assert!(matches!(err, HelixError::Upload(UploadError::EmptyFile { .. })));

    let rows = engine.uploads_for_user("user-1").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, UploadStatus::Failed);
    assert!(rows[0].failure_reason.is_some());
}

#[test]
fn extension_contradicting_declared_format_is_rejected() {
    let (_engine, handler) = setup();
    let err = handler
        .register("user-1", "reads.fastq", SMALL_VCF.as_bytes(), UploadFormat::Vcf)
        .unwrap_err();
    assert!(matches!(
        err,
        HelixError::Upload(UploadError::FormatMismatch { .. })
    ));
}

#[test]
fn malformed_vcf_is_rejected_with_reason() {
    let (engine, handler) = setup();
    let err = handler
        .register("user-1", "bad.vcf", b"this is not a vcf\n", UploadFormat::Vcf)
        .unwrap_err();
    assert!(matches!(
        err,
        HelixError::Upload(UploadError::UnsupportedFormat { .. })
    ));

    let rows = engine.uploads_for_user("user-1").unwrap();
    assert_eq!(rows[0].status, UploadStatus::Failed);
}

#[test]
fn binary_bytes_are_rejected() {
    let (_engine, handler) = setup();
    let err = handler
        .register("user-1", "blob.vcf", &[0xff, 0xfe, 0x00, 0x01], UploadFormat::Vcf)
        .unwrap_err();
    assert!(matches!(
        err,
        HelixError::Upload(UploadError::UnsupportedFormat { .. })
    ));
}

#[test]
fn duplicate_bytes_are_flagged_not_rejected() {
    let (_engine, handler) = setup();
    let first = handler
        .register("user-1", "sample.vcf", SMALL_VCF.as_bytes(), UploadFormat::Vcf)
        .unwrap();
    let second = handler
        .register("user-1", "sample-again.vcf", SMALL_VCF.as_bytes(), UploadFormat::Vcf)
        .unwrap();

    assert_eq!(second.status, UploadStatus::Validated);
    assert_eq!(
        second.metadata["duplicate_of"],
        MetadataValue::Text(first.id.clone())
    );

    // Same bytes from a different user are not a duplicate.
    let other = handler
        .register("user-2", "sample.vcf", SMALL_VCF.as_bytes(), UploadFormat::Vcf)
        .unwrap();
    assert!(!other.metadata.contains_key("duplicate_of"));
}
