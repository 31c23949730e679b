//! Trait seams between subsystems. Storage traits are object-safe and
//! `Send + Sync` so engines can be generic over their backing store.

mod renderer;
mod scorer;
mod storage;

pub use renderer::ReportRenderer;
pub use scorer::{RiskScorer, ScoreOutput};
pub use storage::{IAlertStore, IConsentStore, IResultStore, IUploadStore};
