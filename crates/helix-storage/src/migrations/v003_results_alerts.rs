//! v003: prediction_results, alerts.

use rusqlite::Connection;

use helix_core::errors::HelixResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> HelixResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS prediction_results (
            id                    TEXT PRIMARY KEY,
            user_id               TEXT NOT NULL,
            disease_id            TEXT NOT NULL,
            model_version         TEXT,
            risk_score            REAL,
            risk_class            TEXT,
            consent_version_used  TEXT,
            status                TEXT NOT NULL,
            failure_reason        TEXT,
            created_at            TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_results_user ON prediction_results(user_id);
        CREATE INDEX IF NOT EXISTS idx_results_user_disease
            ON prediction_results(user_id, disease_id, created_at);

        CREATE TABLE IF NOT EXISTS alerts (
            id                    TEXT PRIMARY KEY,
            user_id               TEXT NOT NULL,
            prediction_result_id  TEXT NOT NULL UNIQUE,
            message               TEXT NOT NULL,
            severity              TEXT NOT NULL,
            created_at            TEXT NOT NULL,
            acknowledged          INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_alerts_user ON alerts(user_id, acknowledged);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
