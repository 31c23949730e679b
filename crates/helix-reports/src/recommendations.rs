//! Per-disease, per-risk-class recommendation text for reports.

use helix_core::models::RiskClass;

pub fn recommendations_for(disease_id: &str, risk_class: RiskClass) -> Vec<String> {
    let mut out = match risk_class {
        RiskClass::Low => vec![
            "Maintain your current lifestyle and screening schedule.".to_string(),
        ],
        RiskClass::Moderate => vec![
            "Discuss these findings with your primary care provider.".to_string(),
            "Consider a follow-up screening within the next 12 months.".to_string(),
        ],
        RiskClass::High => vec![
            "Consult a specialist to review these findings.".to_string(),
            "Schedule a clinical assessment as soon as practical.".to_string(),
        ],
    };
    match (disease_id, risk_class) {
        ("diabetes", RiskClass::Moderate | RiskClass::High) => {
            out.push("Regular blood glucose monitoring is advised.".to_string());
        }
        ("alzheimers", RiskClass::Moderate | RiskClass::High) => {
            out.push("Cognitive tests are advised.".to_string());
        }
        ("tumor", RiskClass::High) => {
            out.push("Imaging follow-up is advised.".to_string());
        }
        _ => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_risk_gets_disease_specific_advice() {
        let recs = recommendations_for("diabetes", RiskClass::High);
        assert!(recs.iter().any(|r| r.contains("glucose")));
    }

    #[test]
    fn low_risk_is_generic() {
        let recs = recommendations_for("tumor", RiskClass::Low);
        assert_eq!(recs.len(), 1);
    }
}
