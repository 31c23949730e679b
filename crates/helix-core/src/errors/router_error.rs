/// Prediction router errors. `IncompleteData` is permanent; `Unavailable`
/// is surfaced after the retry budget is exhausted and remains retryable
/// from the caller's side.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("upload {upload_id} metadata missing required fields: {missing:?}")]
    IncompleteData {
        upload_id: String,
        missing: Vec<String>,
    },

    #[error("upload not found: {upload_id}")]
    UploadNotFound { upload_id: String },

    #[error("upload {upload_id} is not validated (status: {status})")]
    UploadNotValidated { upload_id: String, status: String },

    #[error("model service for {disease_id} unavailable after {attempts} attempts: {reason}")]
    Unavailable {
        disease_id: String,
        attempts: u32,
        reason: String,
    },
}
