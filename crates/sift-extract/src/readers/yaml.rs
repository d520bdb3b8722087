//! YAML reader.

use super::Reader;
use crate::error::{ExtractError, ExtractResult};
use serde_json::Value;
use std::path::Path;

/// Parses YAML and re-serializes it as pretty JSON, so downstream splitting
/// sees one structured notation regardless of the source dialect.
pub struct YamlReader;

impl YamlReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for YamlReader {
    fn read(&self, path: &Path) -> ExtractResult<String> {
        let text = std::fs::read_to_string(path)?;

        let value: Value =
            serde_yaml::from_str(&text).map_err(|e| ExtractError::ReaderFailed {
                path: path.to_path_buf(),
                message: format!("invalid YAML: {e}"),
            })?;

        // An empty document parses as null; surface it as an empty object.
        let value = match value {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };

        serde_json::to_string_pretty(&value).map_err(|e| ExtractError::ReaderFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_becomes_json() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(file, "name: demo\nitems:\n  - a\n  - b\n").unwrap();

        let text = YamlReader::new().read(file.path()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["name"], "demo");
        assert_eq!(value["items"][0], "a");
    }

    #[test]
    fn test_blank_document_is_empty_object() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(file, "\n").unwrap();

        let text = YamlReader::new().read(file.path()).unwrap();
        assert_eq!(text, "{}");
    }

    #[test]
    fn test_invalid_yaml_is_reader_failure() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(file, "a: [1,\nb: :::").unwrap();

        let err = YamlReader::new().read(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::ReaderFailed { .. }));
    }
}
