//! # helix-core
//!
//! Foundation crate for the Helix risk-prediction pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::HelixConfig;
pub use errors::{HelixError, HelixResult};
pub use models::{
    Alert, ConsentRecord, FeatureVector, GenomicUpload, PredictionRequest, PredictionResult,
    RiskClass, RiskScore, Severity, UploadFormat, UploadStatus,
};
