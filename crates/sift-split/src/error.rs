//! Error types for text splitting.

use thiserror::Error;

/// Result type for splitting operations.
pub type SplitResult<T> = Result<T, SplitError>;

/// Errors that can occur while configuring or running a splitter.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid splitter configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown splitting method: {0}")]
    UnknownMethod(String),

    #[error("Structured input cannot be partitioned: {0}")]
    Malformed(String),
}
