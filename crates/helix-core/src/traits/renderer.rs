use crate::errors::HelixResult;

/// Rendering seam for assembled reports. PDF and friends live outside the
/// pipeline; the assembler only hands over a serialized document.
pub trait ReportRenderer: Send + Sync {
    /// Render the JSON document to the target representation (bytes).
    fn render(&self, document: &serde_json::Value) -> HelixResult<Vec<u8>>;
}
