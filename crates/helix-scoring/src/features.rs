//! Per-disease feature specs: which upload-metadata fields a model needs,
//! and in what order.

use std::collections::HashMap;

use helix_core::errors::{HelixResult, RouterError};
use helix_core::models::{FeatureVector, GenomicUpload};

/// Names the metadata fields one disease's model consumes, in model input
/// order.
#[derive(Debug, Clone)]
pub struct FeatureSpec {
    pub disease_id: String,
    pub fields: Vec<String>,
}

impl FeatureSpec {
    pub fn new(disease_id: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            disease_id: disease_id.into(),
            fields,
        }
    }

    /// Build the model input from an upload's metadata. Missing or
    /// non-numeric fields fail with `IncompleteData` listing every absent
    /// name, so the caller sees the full remediation at once.
    pub fn build(&self, upload: &GenomicUpload) -> HelixResult<FeatureVector> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut missing = Vec::new();
        for field in &self.fields {
            match upload.metadata.get(field).and_then(|v| v.as_f64()) {
                Some(value) => values.push(value),
                None => missing.push(field.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(RouterError::IncompleteData {
                upload_id: upload.id.clone(),
                missing,
            }
            .into());
        }
        Ok(FeatureVector::new(self.fields.clone(), values))
    }

    /// Default specs for the diseases the pipeline ships with. All three
    /// consume the structural VCF counts; per-disease weighting happens
    /// inside the model, not here.
    pub fn defaults() -> HashMap<String, FeatureSpec> {
        let structural = || {
            vec![
                "variant_count".to_string(),
                "pass_filter_count".to_string(),
                "sample_count".to_string(),
            ]
        };
        ["diabetes", "alzheimers", "tumor"]
            .into_iter()
            .map(|disease| (disease.to_string(), FeatureSpec::new(disease, structural())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use helix_core::errors::HelixError;
    use helix_core::models::{MetadataValue, UploadFormat, UploadStatus};

    use super::*;

    fn upload_with(fields: &[(&str, i64)]) -> GenomicUpload {
        let metadata: BTreeMap<String, MetadataValue> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), MetadataValue::Int(*v)))
            .collect();
        GenomicUpload {
            id: "u-1".to_string(),
            user_id: "user-1".to_string(),
            filename: "a.vcf".to_string(),
            format: UploadFormat::Vcf,
            size_bytes: 10,
            checksum: "abc".to_string(),
            metadata,
            status: UploadStatus::Validated,
            failure_reason: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn builds_in_field_order() {
        let spec = FeatureSpec::new("diabetes", vec!["b".to_string(), "a".to_string()]);
        let vector = spec.build(&upload_with(&[("a", 1), ("b", 2)])).unwrap();
        assert_eq!(vector.values, vec![2.0, 1.0]);
    }

    #[test]
    fn reports_all_missing_fields() {
        let spec = FeatureSpec::new(
            "diabetes",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        let err = spec.build(&upload_with(&[("b", 2)])).unwrap_err();
        match err {
            HelixError::Router(RouterError::IncompleteData { missing, .. }) => {
                assert_eq!(missing, vec!["a".to_string(), "c".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
