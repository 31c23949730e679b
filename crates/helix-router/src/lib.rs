//! Prediction router: the orchestration core. Enforces consent-then-
//! inference ordering, classifies failures into permanent vs transient,
//! and persists every terminal state exactly once.

mod router;
mod state;

pub use router::PredictionRouter;
pub use state::{RequestState, RetryPolicy};
