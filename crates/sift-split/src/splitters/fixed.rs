//! Fixed-size character splitting.

use super::Splitter;
use crate::error::SplitResult;
use unicode_segmentation::UnicodeSegmentation;

/// Slices text into contiguous runs of `size` grapheme clusters.
///
/// Concatenating the output reconstructs the input exactly; a size larger
/// than the text yields the whole text as one chunk.
pub struct FixedSplitter {
    size: usize,
}

impl FixedSplitter {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Splitter for FixedSplitter {
    fn split(&self, text: &str) -> SplitResult<Vec<String>> {
        if text.is_empty() {
            return Ok(vec![]);
        }

        let graphemes: Vec<&str> = text.graphemes(true).collect();
        if self.size >= graphemes.len() {
            return Ok(vec![text.to_string()]);
        }

        let chunks = graphemes
            .chunks(self.size)
            .map(|group| group.concat())
            .collect();
        Ok(chunks)
    }
}
