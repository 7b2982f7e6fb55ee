//! Error Taxonomy
//!
//! Errors that can reach the request boundary. Per-file read failures are not
//! part of this enum: the scanner contains them and reports a zero contribution.

use axum::http::StatusCode;

pub type Result<T, E = StatsError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Malformed, incomplete or empty request payload.
    #[error("{0}")]
    Validation(String),

    /// The configured corpus pattern could not be parsed.
    #[error("invalid corpus pattern: {0}")]
    CorpusPattern(#[from] glob::PatternError),

    /// A directory on the corpus path could not be read while listing files.
    #[error("failed to list corpus files: {0}")]
    CorpusListing(#[from] glob::GlobError),

    /// The response body could not be encoded.
    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A fan-out task panicked or was cancelled before producing a result.
    #[error("worker task failed: {0}")]
    Worker(String),
}

impl StatsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StatsError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
