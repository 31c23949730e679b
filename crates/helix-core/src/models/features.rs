use serde::{Deserialize, Serialize};

/// Ordered model input: feature names paired with values, in the order the
/// scorer's feature spec declares. Built by the router from upload
/// metadata; consumed by a scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(names: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
