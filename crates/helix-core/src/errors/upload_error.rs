/// Upload validation errors. All user-correctable; never retried.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("empty file: {filename}")]
    EmptyFile { filename: String },

    #[error("unsupported format for {filename}: {reason}")]
    UnsupportedFormat { filename: String, reason: String },

    #[error("declared format {declared} does not match content: {reason}")]
    FormatMismatch { declared: String, reason: String },
}
