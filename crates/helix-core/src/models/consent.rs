use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single consent grant for one `(user, feature)` key.
///
/// At most one *active* record (granted, not revoked) may exist per key;
/// a new grant supersedes the prior one by revoking it in the same
/// transaction. The ledger enforces this with per-key serialization plus
/// a partial unique index in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub user_id: String,
    pub feature_id: String,
    /// Consent document version the user agreed to, e.g. "v2".
    pub version: String,
    pub granted: bool,
    pub granted_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ConsentRecord {
    /// True iff this record still authorizes the feature.
    pub fn is_active(&self) -> bool {
        self.granted && self.revoked_at.is_none()
    }
}
