//! Common error types for Griot

use thiserror::Error;

/// Common result type for Griot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Griot archive
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied data failed the required-field set for its kind
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Moderation action attempted from a terminal or wrong state
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    /// Stored data violates a schema invariant (e.g. base row without its
    /// extension row). Logged server-side, never shown as ordinary not-found.
    #[error("Integrity fault: {0}")]
    Integrity(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
