//! Default values re-exported from `constants` so config and code agree.

pub use crate::constants::{
    DEFAULT_BASE_BACKOFF_MS, DEFAULT_CALL_TIMEOUT_MS, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_ELAPSED_MS,
};
