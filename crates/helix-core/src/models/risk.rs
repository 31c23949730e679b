use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{RISK_LOW_CEILING, RISK_MODERATE_CEILING};

/// Risk score clamped to [0.0, 1.0]. The continuous output of a model
/// service before bucketing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RiskScore(f64);

impl RiskScore {
    /// Create a new RiskScore, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Bucket the continuous score into a discrete class.
    pub fn class(self) -> RiskClass {
        if self.0 < RISK_LOW_CEILING {
            RiskClass::Low
        } else if self.0 < RISK_MODERATE_CEILING {
            RiskClass::Moderate
        } else {
            RiskClass::High
        }
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for RiskScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Discretized risk bucket derived from a `RiskScore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskClass {
    Low,
    Moderate,
    High,
}

impl RiskClass {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskClass::Low => "low",
            RiskClass::Moderate => "moderate",
            RiskClass::High => "high",
        }
    }
}

impl fmt::Display for RiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskClass::Low),
            "moderate" => Ok(RiskClass::Moderate),
            "high" => Ok(RiskClass::High),
            other => Err(format!("unknown risk class: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn score_is_clamped() {
        assert_eq!(RiskScore::new(-0.5).value(), 0.0);
        assert_eq!(RiskScore::new(1.7).value(), 1.0);
        assert_eq!(RiskScore::new(0.42).value(), 0.42);
    }

    #[test]
    fn bucket_edges() {
        assert_eq!(RiskScore::new(0.0).class(), RiskClass::Low);
        assert_eq!(RiskScore::new(0.299).class(), RiskClass::Low);
        assert_eq!(RiskScore::new(0.3).class(), RiskClass::Moderate);
        assert_eq!(RiskScore::new(0.599).class(), RiskClass::Moderate);
        assert_eq!(RiskScore::new(0.6).class(), RiskClass::High);
        assert_eq!(RiskScore::new(1.0).class(), RiskClass::High);
    }

    proptest! {
        #[test]
        fn class_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let order = |c: RiskClass| match c {
                RiskClass::Low => 0,
                RiskClass::Moderate => 1,
                RiskClass::High => 2,
            };
            prop_assert!(order(RiskScore::new(lo).class()) <= order(RiskScore::new(hi).class()));
        }
    }
}
