//! Common error types for the programme catalog

use thiserror::Error;

use crate::validate::ValidationError;

/// Common result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the catalog crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in the feed, a stored snapshot, or a request body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network failure while fetching the feed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Candidate programme rejected by the validator
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// True for storage and network failures, which are surfaced to the
    /// caller as a failed operation and never retried.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::Io(_) | Error::Http(_) | Error::Json(_)
        )
    }
}
