//! Conversion strategy registry.

use crate::converters::{
    Base64Converter, Converter, JsonConverter, MarkdownConverter, PdfConverter, PngConverter,
};
use crate::error::{ConvertError, ConvertResult};
use sift_core::{StrategyMap, NO_OP_STRATEGY};

/// Known conversion strategies, each named after its target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterKind {
    Markdown,
    Json,
    Pdf,
    Png,
    Base64,
}

impl ConverterKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "markdown" => Some(Self::Markdown),
            "json" => Some(Self::Json),
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "base64" => Some(Self::Base64),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Base64 => "base64",
        }
    }
}

/// Outcome of resolving an extension against the strategy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The file is already acceptable downstream; copy it through.
    PassThrough,
    Convert(ConverterKind),
}

/// Maps extensions to converters through an immutable strategy table.
///
/// The whole table is validated when the registry is built, so a misspelled
/// strategy name in configuration fails at startup instead of on the first
/// matching file.
#[derive(Debug)]
pub struct ConverterRegistry {
    map: StrategyMap,
}

impl ConverterRegistry {
    pub fn new(map: StrategyMap) -> ConvertResult<Self> {
        for name in map.strategy_names() {
            if name != NO_OP_STRATEGY && ConverterKind::from_name(name).is_none() {
                return Err(ConvertError::UnknownStrategy(name.to_string()));
            }
        }
        Ok(Self { map })
    }

    pub fn resolve(&self, ext: &str) -> Resolution {
        let name = self.map.resolve(ext);
        match ConverterKind::from_name(name) {
            Some(kind) => Resolution::Convert(kind),
            // Validated at construction: anything unknown here is the sentinel.
            None => Resolution::PassThrough,
        }
    }

    pub fn instantiate(&self, kind: ConverterKind) -> Box<dyn Converter> {
        match kind {
            ConverterKind::Markdown => Box::new(MarkdownConverter::new()),
            ConverterKind::Json => Box::new(JsonConverter::new()),
            ConverterKind::Pdf => Box::new(PdfConverter::new()),
            ConverterKind::Png => Box::new(PngConverter::new()),
            ConverterKind::Base64 => Box::new(Base64Converter::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map_with(default: &str, pairs: &[(&str, &str)]) -> StrategyMap {
        let overrides: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StrategyMap::new(default, overrides)
    }

    #[test]
    fn test_unknown_strategy_rejected_at_construction() {
        let err = ConverterRegistry::new(map_with("none", &[("docx", "wordperfect")])).unwrap_err();
        assert!(matches!(err, ConvertError::UnknownStrategy(name) if name == "wordperfect"));
    }

    #[test]
    fn test_unknown_default_rejected_at_construction() {
        assert!(ConverterRegistry::new(map_with("shout", &[])).is_err());
    }

    #[test]
    fn test_resolution_honours_overrides_and_sentinel() {
        let registry =
            ConverterRegistry::new(map_with("none", &[("docx", "pdf"), ("html", "markdown")]))
                .unwrap();

        assert_eq!(
            registry.resolve("docx"),
            Resolution::Convert(ConverterKind::Pdf)
        );
        assert_eq!(
            registry.resolve("HTML"),
            Resolution::Convert(ConverterKind::Markdown)
        );
        assert_eq!(registry.resolve("txt"), Resolution::PassThrough);
    }

    #[test]
    fn test_every_kind_round_trips_through_name() {
        for kind in [
            ConverterKind::Markdown,
            ConverterKind::Json,
            ConverterKind::Pdf,
            ConverterKind::Png,
            ConverterKind::Base64,
        ] {
            assert_eq!(ConverterKind::from_name(kind.name()), Some(kind));
        }
    }
}
