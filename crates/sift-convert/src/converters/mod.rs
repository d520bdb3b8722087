//! Concrete file converters.

mod base64_text;
mod json;
mod markdown;
mod pdf;
mod png;

pub use base64_text::Base64Converter;
pub use json::JsonConverter;
pub use markdown::MarkdownConverter;
pub use pdf::PdfConverter;
pub use png::PngConverter;

use crate::error::ConvertResult;
use std::path::Path;

/// Trait for file converters.
///
/// Each implementation accepts a fixed set of source extensions and writes
/// its output in one target format.
pub trait Converter: Send + Sync {
    /// Convert the input file, writing the result to `output`.
    fn convert(&self, input: &Path, output: &Path) -> ConvertResult<()>;

    /// The extension (without dot) of the files this converter produces.
    fn target_extension(&self) -> &'static str;

    /// Source extensions this converter accepts.
    fn extensions(&self) -> &[&str];

    /// Check if this converter supports the given extension.
    fn supports(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
