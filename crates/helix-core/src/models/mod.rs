//! Domain models, one file per aggregate.

pub mod alert;
pub mod consent;
pub mod features;
pub mod prediction;
pub mod risk;
pub mod upload;

pub use alert::{Alert, Severity};
pub use consent::ConsentRecord;
pub use features::FeatureVector;
pub use prediction::{PredictionRequest, PredictionResult, ResultStatus};
pub use risk::{RiskClass, RiskScore};
pub use upload::{GenomicUpload, MetadataValue, UploadFormat, UploadStatus};
