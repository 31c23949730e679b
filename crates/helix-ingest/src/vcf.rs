//! Structural VCF parsing: header directives, sample columns, record
//! counts. Variants are counted and filter-checked, never interpreted.

use std::collections::BTreeMap;

use helix_core::models::MetadataValue;

/// Extract structural metadata from VCF text.
/// Returns an error string describing the first structural violation.
pub fn extract_metadata(text: &str) -> Result<BTreeMap<String, MetadataValue>, String> {
    let mut lines = text.lines();

    let first = lines.next().ok_or("no content")?;
    let fileformat = first
        .strip_prefix("##fileformat=")
        .ok_or("missing ##fileformat header line")?;
    if !fileformat.starts_with("VCF") {
        return Err(format!("fileformat is not VCF: {fileformat}"));
    }

    let mut metadata = BTreeMap::new();
    metadata.insert("vcf_version".to_string(), MetadataValue::from(fileformat));

    let mut saw_column_header = false;
    let mut variant_count: i64 = 0;
    let mut pass_count: i64 = 0;

    for line in lines {
        if let Some(reference) = line.strip_prefix("##reference=") {
            metadata.insert(
                "reference_build".to_string(),
                MetadataValue::from(reference.trim()),
            );
            continue;
        }
        if line.starts_with("##") {
            continue;
        }
        if let Some(header) = line.strip_prefix("#CHROM") {
            saw_column_header = true;
            // Fixed columns after CHROM: POS ID REF ALT QUAL FILTER INFO,
            // then optional FORMAT + one column per sample.
            let cols: Vec<&str> = header.split('\t').filter(|c| !c.is_empty()).collect();
            let sample_count = cols.len().saturating_sub(8) as i64;
            metadata.insert(
                "sample_count".to_string(),
                MetadataValue::Int(sample_count.max(0)),
            );
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        if !saw_column_header {
            return Err("data line before #CHROM column header".to_string());
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 8 {
            return Err(format!(
                "variant line has {} columns, expected at least 8",
                fields.len()
            ));
        }
        variant_count += 1;
        if fields[6] == "PASS" {
            pass_count += 1;
        }
    }

    if !saw_column_header {
        return Err("missing #CHROM column header".to_string());
    }

    metadata.insert("variant_count".to_string(), MetadataValue::Int(variant_count));
    metadata.insert(
        "pass_filter_count".to_string(),
        MetadataValue::Int(pass_count),
    );
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "##fileformat=VCFv4.2\n\
##reference=GRCh38\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSAMPLE1\n\
chr1\t1000\trs123\tA\tT\t100\tPASS\t.\tGT\t0/1\n\
chr2\t2000\trs456\tG\tC\t95\tlowq\t.\tGT\t1/1\n";

    #[test]
    fn extracts_counts_and_build() {
        let meta = extract_metadata(SAMPLE).unwrap();
        assert_eq!(meta["variant_count"], MetadataValue::Int(2));
        assert_eq!(meta["pass_filter_count"], MetadataValue::Int(1));
        assert_eq!(meta["sample_count"], MetadataValue::Int(1));
        assert_eq!(meta["reference_build"].as_str(), Some("GRCh38"));
        assert_eq!(meta["vcf_version"].as_str(), Some("VCFv4.2"));
    }

    #[test]
    fn rejects_missing_fileformat() {
        assert!(extract_metadata("#CHROM\tPOS\n").is_err());
    }

    #[test]
    fn rejects_short_variant_line() {
        let bad = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\nchr1\t1\n";
        let err = extract_metadata(bad).unwrap_err();
        assert!(err.contains("columns"));
    }
}
