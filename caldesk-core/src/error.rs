//! Error types for caldesk.

use thiserror::Error;

/// Errors that can occur in caldesk operations.
///
/// The [`Store`](crate::store::Store) never hands these to its callers; they
/// surface from configuration loading and from the lower-level persistence
/// helpers, where the store turns them into log lines.
#[derive(Error, Debug)]
pub enum CalDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),
}

/// Result type alias for caldesk operations.
pub type CalDeskResult<T> = Result<T, CalDeskError>;
