//! Per-table query modules. Each keeps its row mapping private and speaks
//! `HelixResult` at the boundary.

pub mod alert_ops;
pub mod consent_ops;
pub mod result_ops;
pub mod upload_ops;

use chrono::{DateTime, Utc};

/// Parse a stored RFC 3339 timestamp. A corrupt value is a row-mapping
/// error, never silently replaced.
pub(crate) fn parse_timestamp(value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
