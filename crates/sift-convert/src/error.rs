//! Error types for file conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// One failed technique inside a fallback chain.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub technique: String,
    pub error: String,
}

/// Errors that can occur during conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No converter registered for '{0}'")]
    UnknownStrategy(String),

    #[error("Unsupported extension for {strategy} conversion: {extension}")]
    Unsupported {
        strategy: &'static str,
        extension: String,
    },

    #[error("Source file is empty: {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("Required tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("Failed to parse {format} input: {message}")]
    ParseFailed {
        format: &'static str,
        message: String,
    },

    #[error("All conversion techniques failed: {}", format_attempts(.attempts))]
    Failed { attempts: Vec<Attempt> },
}

fn format_attempts(attempts: &[Attempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.technique, a.error))
        .collect::<Vec<_>>()
        .join("; ")
}
