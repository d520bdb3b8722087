//! Core domain types for sift.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One bounded unit of output text produced by the chunking engine.
///
/// Indices are 1-based and gap-free within a document's output set; the
/// persistence layer derives file names from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub index: usize,
    pub content: String,
}

impl Chunk {
    pub fn new(index: usize, content: impl Into<String>) -> Self {
        Self {
            index,
            content: content.into(),
        }
    }
}

/// Normalize a file extension into the canonical lookup key: lower-cased,
/// without a leading dot.
///
/// Every strategy lookup in the pipeline goes through this function, so
/// override tables match regardless of how the extension was spelled.
pub fn normalize_ext(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

/// Extension key for a path, already normalized. Extensionless files map to
/// an empty key.
pub fn ext_key(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(normalize_ext)
        .unwrap_or_default()
}
