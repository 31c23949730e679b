//! Structural FASTQ parsing: four-line records, length agreement between
//! sequence and quality strings, aggregate read stats.

use std::collections::BTreeMap;

use helix_core::models::MetadataValue;

/// Extract structural metadata from FASTQ text.
pub fn extract_metadata(text: &str) -> Result<BTreeMap<String, MetadataValue>, String> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return Err("no content".to_string());
    }
    if lines.len() % 4 != 0 {
        return Err(format!(
            "line count {} is not a multiple of 4",
            lines.len()
        ));
    }

    let mut read_count: i64 = 0;
    let mut min_len = usize::MAX;
    let mut max_len = 0usize;
    let mut quality_sum: u64 = 0;
    let mut quality_bases: u64 = 0;

    for record in lines.chunks(4) {
        let [header, sequence, separator, quality] = record else {
            return Err("truncated record".to_string());
        };
        if !header.starts_with('@') {
            return Err(format!("record {read_count}: header does not start with '@'"));
        }
        if !separator.starts_with('+') {
            return Err(format!("record {read_count}: separator does not start with '+'"));
        }
        if sequence.len() != quality.len() {
            return Err(format!(
                "record {read_count}: sequence length {} != quality length {}",
                sequence.len(),
                quality.len()
            ));
        }
        if sequence.is_empty() {
            return Err(format!("record {read_count}: empty sequence"));
        }
        if let Some(bad) = sequence
            .bytes()
            .find(|b| !matches!(b, b'A' | b'C' | b'G' | b'T' | b'N' | b'a' | b'c' | b'g' | b't' | b'n'))
        {
            return Err(format!(
                "record {read_count}: invalid base {:?}",
                bad as char
            ));
        }

        read_count += 1;
        min_len = min_len.min(sequence.len());
        max_len = max_len.max(sequence.len());
        // Phred+33 offsets; anything below '!' is malformed but harmless
        // to saturate here since we only report an aggregate.
        quality_sum += quality.bytes().map(|b| b.saturating_sub(33) as u64).sum::<u64>();
        quality_bases += quality.len() as u64;
    }

    let mut metadata = BTreeMap::new();
    metadata.insert("read_count".to_string(), MetadataValue::Int(read_count));
    metadata.insert(
        "min_read_length".to_string(),
        MetadataValue::Int(min_len as i64),
    );
    metadata.insert(
        "max_read_length".to_string(),
        MetadataValue::Int(max_len as i64),
    );
    if quality_bases > 0 {
        metadata.insert(
            "mean_quality".to_string(),
            MetadataValue::Float(quality_sum as f64 / quality_bases as f64),
        );
    }
    Ok(metadata)
}
