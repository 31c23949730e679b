/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("row not found: {entity} {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("serialization failed: {message}")]
    Serialization { message: String },

    #[error("config error: {message}")]
    Config { message: String },
}
