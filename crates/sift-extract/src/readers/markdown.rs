//! Default reader for markdown and plain text.

use super::Reader;
use crate::error::ExtractResult;
use std::path::Path;

/// Reads text through unchanged apart from whitespace normalization.
pub struct MarkdownReader;

impl MarkdownReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for MarkdownReader {
    fn read(&self, path: &Path) -> ExtractResult<String> {
        let content = std::fs::read_to_string(path)?;
        Ok(normalize_whitespace(&content))
    }
}

/// Trim trailing space per line and collapse runs of blank lines.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines() {
        let line = line.trim_end();
        let last_was_blank = lines.last().map(|l| l.is_empty()).unwrap_or(false);
        if line.is_empty() && last_was_blank {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n")
}
