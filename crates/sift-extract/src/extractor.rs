//! The extraction front door.

use crate::describe::{Describe, NoopDescriber};
use crate::error::{ExtractError, ExtractResult};
use crate::readers::ReaderRegistry;
use sift_core::{ext_key, StrategyMap};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Extracts normalized text from a canonical file.
///
/// Reader selection goes through the same override/default strategy table
/// the conversion stage uses; the table is validated when the extractor is
/// built.
pub struct Extractor {
    registry: ReaderRegistry,
    describer: Arc<dyn Describe>,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Extractor {
    /// Build an extractor without a description capability.
    pub fn new(strategies: StrategyMap) -> ExtractResult<Self> {
        Self::with_describer(strategies, Arc::new(NoopDescriber))
    }

    /// Build an extractor with an injected description capability.
    pub fn with_describer(
        strategies: StrategyMap,
        describer: Arc<dyn Describe>,
    ) -> ExtractResult<Self> {
        Ok(Self {
            registry: ReaderRegistry::new(strategies)?,
            describer,
        })
    }

    /// Extract text from `path`.
    ///
    /// A missing file is `NotFound`; a zero-byte file is `Empty`. Everything
    /// else is delegated to the reader resolved for the file's extension.
    pub fn extract(&self, path: &Path) -> ExtractResult<String> {
        if !path.exists() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }
        if std::fs::metadata(path)?.len() == 0 {
            return Err(ExtractError::Empty(path.to_path_buf()));
        }

        let ext = ext_key(path);
        let kind = self.registry.resolve(&ext);
        debug!("Extracting {:?} with the {:?} reader", path, kind);

        let reader = self.registry.instantiate(kind, self.describer.clone());
        reader.read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn extractor() -> Extractor {
        let mut overrides = HashMap::new();
        overrides.insert("yaml".to_string(), "yaml".to_string());
        Extractor::new(StrategyMap::new("markdown", overrides)).unwrap()
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = extractor()
            .extract(Path::new("/nonexistent/file.md"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(_)));
    }

    #[test]
    fn test_zero_byte_file_is_empty() {
        let file = NamedTempFile::with_suffix(".md").unwrap();
        let err = extractor().extract(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Empty(_)));
    }

    #[test]
    fn test_default_reader_reads_text() {
        let mut file = NamedTempFile::with_suffix(".md").unwrap();
        write!(file, "# Hello\n\nWorld.").unwrap();

        let text = extractor().extract(file.path()).unwrap();
        assert_eq!(text, "# Hello\n\nWorld.");
    }

    #[test]
    fn test_override_selects_yaml_reader() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(file, "key: value\n").unwrap();

        let text = extractor().extract(file.path()).unwrap();
        assert_eq!(text.trim(), "{\n  \"key\": \"value\"\n}");
    }

    #[test]
    fn test_bad_strategy_table_fails_at_build() {
        let mut overrides = HashMap::new();
        overrides.insert("pdf".to_string(), "divination".to_string());
        let err = Extractor::new(StrategyMap::new("markdown", overrides)).unwrap_err();
        assert!(matches!(err, ExtractError::UnknownStrategy(_)));
    }
}
