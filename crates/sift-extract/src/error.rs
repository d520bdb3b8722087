//! Error types for text extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Errors that can occur during extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("File is empty: {}", .0.display())]
    Empty(PathBuf),

    #[error("No reader registered for '{0}'")]
    UnknownStrategy(String),

    #[error("Reader failed on {}: {message}", .path.display())]
    ReaderFailed { path: PathBuf, message: String },

    #[error("Description capability unavailable: {0}")]
    DescribeUnavailable(String),
}
