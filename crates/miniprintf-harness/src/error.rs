//! Harness error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fixture case '{case}': {message}")]
    InvalidFixture { case: String, message: String },
    #[error("invalid argument '{0}', expected int:N, uint:N, double:X, str:TEXT, ptr:N or null")]
    InvalidArgument(String),
    #[error("case '{case}' cannot be run against the host: {reason}")]
    UnsupportedCase { case: String, reason: String },
    #[error("conformance verification failed: {failed} of {total} cases")]
    VerificationFailed { failed: usize, total: usize },
}
