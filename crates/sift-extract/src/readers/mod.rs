//! Text readers for canonical files.

mod image;
mod markdown;
mod pdf;
mod tabular;
mod yaml;

pub use image::ImageReader;
pub use markdown::MarkdownReader;
pub use pdf::PdfReader;
pub use tabular::TabularReader;
pub use yaml::YamlReader;

use crate::describe::Describe;
use crate::error::{ExtractError, ExtractResult};
use sift_core::{StrategyMap, NO_OP_STRATEGY};
use std::path::Path;
use std::sync::Arc;

/// Trait for readers that turn a file into normalized text.
pub trait Reader: Send + Sync {
    fn read(&self, path: &Path) -> ExtractResult<String>;
}

/// Known extraction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderKind {
    Markdown,
    Pdf,
    Tabular,
    Yaml,
    Image,
}

impl ReaderKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            // The sentinel passes text through unchanged, which is exactly
            // what the markdown reader does.
            "markdown" | NO_OP_STRATEGY => Some(Self::Markdown),
            "pdf" => Some(Self::Pdf),
            "tabular" => Some(Self::Tabular),
            "yaml" => Some(Self::Yaml),
            "image" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Maps extensions to readers through an immutable strategy table,
/// validated in full when the registry is built.
#[derive(Debug)]
pub struct ReaderRegistry {
    map: StrategyMap,
}

impl ReaderRegistry {
    pub fn new(map: StrategyMap) -> ExtractResult<Self> {
        for name in map.strategy_names() {
            if ReaderKind::from_name(name).is_none() {
                return Err(ExtractError::UnknownStrategy(name.to_string()));
            }
        }
        Ok(Self { map })
    }

    pub fn resolve(&self, ext: &str) -> ReaderKind {
        // Validated at construction; unknown names cannot reach here.
        ReaderKind::from_name(self.map.resolve(ext)).unwrap_or(ReaderKind::Markdown)
    }

    pub fn instantiate(&self, kind: ReaderKind, describer: Arc<dyn Describe>) -> Box<dyn Reader> {
        match kind {
            ReaderKind::Markdown => Box::new(MarkdownReader::new()),
            ReaderKind::Pdf => Box::new(PdfReader::new()),
            ReaderKind::Tabular => Box::new(TabularReader::new()),
            ReaderKind::Yaml => Box::new(YamlReader::new()),
            ReaderKind::Image => Box::new(ImageReader::new(describer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_unknown_reader_rejected_at_construction() {
        let mut overrides = HashMap::new();
        overrides.insert("pdf".to_string(), "clairvoyance".to_string());
        let err = ReaderRegistry::new(StrategyMap::new("markdown", overrides)).unwrap_err();
        assert!(matches!(err, ExtractError::UnknownStrategy(_)));
    }

    #[test]
    fn test_sentinel_default_resolves_to_markdown() {
        let registry = ReaderRegistry::new(StrategyMap::new("none", HashMap::new())).unwrap();
        assert_eq!(registry.resolve("txt"), ReaderKind::Markdown);
    }

    #[test]
    fn test_overrides_resolve() {
        let mut overrides = HashMap::new();
        overrides.insert("pdf".to_string(), "pdf".to_string());
        overrides.insert("csv".to_string(), "tabular".to_string());
        let registry = ReaderRegistry::new(StrategyMap::new("markdown", overrides)).unwrap();

        assert_eq!(registry.resolve("pdf"), ReaderKind::Pdf);
        assert_eq!(registry.resolve("CSV"), ReaderKind::Tabular);
        assert_eq!(registry.resolve("md"), ReaderKind::Markdown);
    }
}
