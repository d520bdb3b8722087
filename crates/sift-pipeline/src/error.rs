//! Error types for the document pipeline.

use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors raised while processing a document end to end.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Conversion error: {0}")]
    Convert(#[from] sift_convert::ConvertError),

    #[error("Extraction error: {0}")]
    Extract(#[from] sift_extract::ExtractError),

    #[error("Splitting error: {0}")]
    Split(#[from] sift_split::SplitError),

    #[error("Configuration error: {0}")]
    Config(#[from] sift_config::ConfigError),
}
