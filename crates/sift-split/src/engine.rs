//! Chunking engine front door.

use crate::config::SplitterConfig;
use crate::error::SplitResult;
use crate::splitters::build_splitter;
use sift_config::SplitterSettings;
use sift_core::Chunk;
use tracing::{debug, warn};

/// Splits normalized text into ordered chunks.
///
/// Stateless between calls: every [`split`](Self::split) is a pure function
/// of the text and the validated config held here.
pub struct SplitEngine {
    config: SplitterConfig,
}

impl SplitEngine {
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    /// Build an engine straight from the settings file; parameter validation
    /// happens here, not at split time.
    pub fn from_settings(settings: &SplitterSettings) -> SplitResult<Self> {
        Ok(Self::new(SplitterConfig::from_settings(settings)?))
    }

    pub fn method_name(&self) -> &'static str {
        self.config.method_name()
    }

    /// Split `text` into chunks with 1-based, gap-free indices.
    ///
    /// Empty or whitespace-only text yields an empty result, not an error.
    pub fn split(&self, text: &str) -> SplitResult<Vec<Chunk>> {
        if text.trim().is_empty() {
            warn!("Empty text provided for splitting");
            return Ok(vec![]);
        }

        let splitter = build_splitter(&self.config);
        let contents = splitter.split(text)?;
        debug!(
            method = self.config.method_name(),
            chunks = contents.len(),
            "Split complete"
        );

        Ok(contents
            .into_iter()
            .enumerate()
            .map(|(i, content)| Chunk::new(i + 1, content))
            .collect())
    }
}
