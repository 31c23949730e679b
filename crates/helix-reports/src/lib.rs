//! Report assembler: read-only compilation of a user's accumulated state
//! into a serializable document. Rendering (PDF etc.) stays behind the
//! `ReportRenderer` seam, outside this crate.

mod assembler;
mod recommendations;

pub use assembler::{AlertLine, DiseaseAssessment, ReportAssembler, RiskReport};
pub use recommendations::recommendations_for;
