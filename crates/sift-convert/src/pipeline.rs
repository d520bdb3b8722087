//! The conversion front door.

use crate::error::ConvertResult;
use crate::registry::{ConverterRegistry, Resolution};
use sift_core::{ext_key, StrategyMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Converts a source file into its canonical format inside a caller-owned
/// working directory.
///
/// The pipeline never deletes or reuses `work_dir`; its lifetime belongs to
/// the caller.
#[derive(Debug)]
pub struct ConversionPipeline {
    registry: ConverterRegistry,
}

impl ConversionPipeline {
    /// Build the pipeline, validating the whole strategy table up front.
    pub fn new(strategies: StrategyMap) -> ConvertResult<Self> {
        Ok(Self {
            registry: ConverterRegistry::new(strategies)?,
        })
    }

    /// Convert `source` into `work_dir`, returning the canonical file path.
    pub fn convert(&self, source: &Path, work_dir: &Path) -> ConvertResult<PathBuf> {
        std::fs::create_dir_all(work_dir)?;
        let ext = ext_key(source);

        match self.registry.resolve(&ext) {
            Resolution::PassThrough => {
                // No conversion needed; copy through with the name intact.
                let file_name = source
                    .file_name()
                    .map(|n| n.to_os_string())
                    .unwrap_or_else(|| "input".into());
                let dst = work_dir.join(file_name);
                std::fs::copy(source, &dst)?;
                debug!("Skipped conversion of {:?}, copied to {:?}", source, dst);
                Ok(dst)
            }
            Resolution::Convert(kind) => {
                let converter = self.registry.instantiate(kind);
                let stem = source
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("converted");
                let dst = work_dir.join(format!("{stem}.{}", converter.target_extension()));

                converter.convert(source, &dst)?;
                info!(
                    "Converted {:?} -> {:?} using the {} converter",
                    source,
                    dst,
                    kind.name()
                );
                Ok(dst)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use sift_core::StrategyMap;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn pipeline(default: &str, pairs: &[(&str, &str)]) -> ConversionPipeline {
        let overrides: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConversionPipeline::new(StrategyMap::new(default, overrides)).unwrap()
    }

    #[test]
    fn test_no_op_copies_file_unchanged() {
        let src_dir = tempdir().unwrap();
        let work_dir = tempdir().unwrap();
        let src = src_dir.path().join("notes.md");
        std::fs::write(&src, "# Notes\n\nkeep me intact").unwrap();

        let out = pipeline("none", &[]).convert(&src, work_dir.path()).unwrap();

        assert_eq!(out.file_name().unwrap(), "notes.md");
        assert_eq!(std::fs::read_to_string(out).unwrap(), "# Notes\n\nkeep me intact");
        // Source untouched
        assert!(src.exists());
    }

    #[test]
    fn test_converted_output_uses_target_extension() {
        let src_dir = tempdir().unwrap();
        let work_dir = tempdir().unwrap();
        let src = src_dir.path().join("config.yaml");
        std::fs::write(&src, "name: demo\ncount: 3\n").unwrap();

        let out = pipeline("none", &[("yaml", "json")])
            .convert(&src, work_dir.path())
            .unwrap();

        assert_eq!(out.file_name().unwrap(), "config.json");
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["name"], "demo");
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn test_unknown_strategy_fails_before_any_request() {
        let err = ConversionPipeline::new(StrategyMap::new("telepathy", HashMap::new()))
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnknownStrategy(_)));
    }
}
