//! Splitting strategies.

mod fixed;
mod paragraph;
mod recursive;
mod schema;
mod sentence;
mod word;

pub use fixed::FixedSplitter;
pub use paragraph::ParagraphSplitter;
pub use recursive::{RecursiveSplitter, DEFAULT_SEPARATORS};
pub use schema::SchemaSplitter;
pub use sentence::SentenceSplitter;
pub use word::WordSplitter;

use crate::config::SplitterConfig;
use crate::error::SplitResult;

/// Trait for text splitters.
pub trait Splitter: Send + Sync {
    /// Split the provided text into chunk contents.
    fn split(&self, text: &str) -> SplitResult<Vec<String>>;
}

/// Build the splitter a validated config describes.
pub fn build_splitter(config: &SplitterConfig) -> Box<dyn Splitter> {
    match config {
        SplitterConfig::Word { num_words } => Box::new(WordSplitter::new(*num_words)),
        SplitterConfig::Sentence { num_sentences } => {
            Box::new(SentenceSplitter::new(*num_sentences))
        }
        SplitterConfig::Paragraph { num_paragraphs } => {
            Box::new(ParagraphSplitter::new(*num_paragraphs))
        }
        SplitterConfig::Fixed { size } => Box::new(FixedSplitter::new(*size)),
        SplitterConfig::Recursive {
            size,
            overlap,
            separators,
        } => Box::new(RecursiveSplitter::new(*size, *overlap, separators.clone())),
        SplitterConfig::SchemaBased {
            max_chunk_size,
            max_num_rows,
            header_lines,
        } => Box::new(SchemaSplitter::new(
            *max_chunk_size,
            *max_num_rows,
            *header_lines,
        )),
    }
}
