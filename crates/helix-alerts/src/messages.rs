//! Alert message text, keyed by disease and severity.

use helix_core::models::Severity;

/// Human-readable alert message for a disease at a severity level.
pub fn alert_message(disease_id: &str, severity: Severity) -> String {
    let disease = disease_display_name(disease_id);
    match severity {
        Severity::Critical => {
            format!("High {disease} risk detected. Please consult your doctor.")
        }
        Severity::Warning => {
            format!("Elevated {disease} risk detected. A follow-up screening is recommended.")
        }
        Severity::Info => {
            format!("New {disease} risk assessment available.")
        }
    }
}

fn disease_display_name(disease_id: &str) -> &str {
    match disease_id {
        "diabetes" => "diabetes",
        "alzheimers" => "Alzheimer's",
        "tumor" => "brain tumor",
        other => other,
    }
}
