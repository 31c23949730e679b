//! Upload handler: validates genomic files structurally, computes
//! checksums, extracts metadata, and registers the artifact. No network
//! calls and no clinical interpretation happen here.

mod fastq;
mod handler;
mod vcf;

pub use handler::UploadHandler;
