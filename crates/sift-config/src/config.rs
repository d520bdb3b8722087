//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use serde::{Deserialize, Serialize};
use sift_core::StrategyMap;
use std::collections::HashMap;
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub conversion: StrategyConfig,

    #[serde(default)]
    pub extraction: StrategyConfig,

    #[serde(default)]
    pub splitter: SplitterSettings,

    #[serde(default)]
    pub describe: DescribeConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> ConfigResult<Self> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&paths.config_file)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &PathBuf) -> ConfigResult<()> {
        let default_config = Self::default_config_string();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, default_config)?;
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# Sift Configuration
# Document ingestion, normalization and chunking

[files]
# Where process-directory runs look for documents
input_dir = "data/input"

# Where chunk files are written
output_dir = "data/output"

[conversion]
# Conversion strategy applied before extraction. "none" copies the file
# through untouched. Each strategy names its target format.
default = "none"

[conversion.overrides]
# docx = "pdf"
# pptx = "pdf"
# html = "markdown"
# yaml = "json"

[extraction]
# Reader used to turn the canonical file into text.
default = "markdown"

[extraction.overrides]
pdf = "pdf"
csv = "tabular"
xlsx = "tabular"
yaml = "yaml"
yml = "yaml"
png = "image"
jpg = "image"
jpeg = "image"

[splitter]
# One of: word, sentence, paragraph, fixed, recursive, schema-based
method = "recursive"

[splitter.word]
num_words = 100

[splitter.sentence]
num_sentences = 5

[splitter.paragraph]
num_paragraphs = 3

[splitter.fixed]
size = 500

[splitter.recursive]
size = 500
overlap = 25
# Separators tried coarsest-first when picking window boundaries.
# separators = ["\n\n", "\n", ". ", " ", ""]

[splitter.schema-based]
max_chunk_size = 300
max_num_rows = 50
header_lines = 1

[describe]
# Optional image description via a local Ollama server. Off by default;
# OCR output alone is used when disabled.
enabled = false
host = "http://localhost:11434"
model = "llava"
timeout_seconds = 120
"#
        .to_string()
    }
}

/// Input/output directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub input_dir: String,
    pub output_dir: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input_dir: "data/input".to_string(),
            output_dir: "data/output".to_string(),
        }
    }
}

/// Extension-keyed strategy table for one pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub default: String,
    pub overrides: HashMap<String, String>,
}

impl StrategyConfig {
    /// Build the immutable lookup map the registries consume.
    pub fn to_map(&self) -> StrategyMap {
        StrategyMap::new(self.default.clone(), self.overrides.clone())
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            default: sift_core::NO_OP_STRATEGY.to_string(),
            overrides: HashMap::new(),
        }
    }
}

/// Splitter method selection plus per-method parameter tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterSettings {
    pub method: String,
    pub word: WordParams,
    pub sentence: SentenceParams,
    pub paragraph: ParagraphParams,
    pub fixed: FixedParams,
    pub recursive: RecursiveParams,
    #[serde(rename = "schema-based")]
    pub schema_based: SchemaParams,
}

impl Default for SplitterSettings {
    fn default() -> Self {
        Self {
            method: "recursive".to_string(),
            word: WordParams::default(),
            sentence: SentenceParams::default(),
            paragraph: ParagraphParams::default(),
            fixed: FixedParams::default(),
            recursive: RecursiveParams::default(),
            schema_based: SchemaParams::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordParams {
    pub num_words: usize,
}

impl Default for WordParams {
    fn default() -> Self {
        Self { num_words: 100 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentenceParams {
    pub num_sentences: usize,
}

impl Default for SentenceParams {
    fn default() -> Self {
        Self { num_sentences: 5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphParams {
    pub num_paragraphs: usize,
}

impl Default for ParagraphParams {
    fn default() -> Self {
        Self { num_paragraphs: 3 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedParams {
    pub size: usize,
}

impl Default for FixedParams {
    fn default() -> Self {
        Self { size: 500 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecursiveParams {
    pub size: usize,
    pub overlap: usize,
    /// Coarsest-first boundary candidates; `None` uses the built-in list.
    pub separators: Option<Vec<String>>,
}

impl Default for RecursiveParams {
    fn default() -> Self {
        Self {
            size: 500,
            overlap: 25,
            separators: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaParams {
    pub max_chunk_size: usize,
    pub max_num_rows: usize,
    pub header_lines: usize,
}

impl Default for SchemaParams {
    fn default() -> Self {
        Self {
            max_chunk_size: 300,
            max_num_rows: 50,
            header_lines: 1,
        }
    }
}

/// Image description capability settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DescribeConfig {
    pub enabled: bool,
    pub host: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "http://localhost:11434".to_string(),
            model: "llava".to_string(),
            timeout_seconds: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.conversion.default, "none");
        assert_eq!(config.splitter.method, "recursive");
        assert_eq!(config.splitter.recursive.size, 500);
        assert!(!config.describe.enabled);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.splitter.method, deserialized.splitter.method);
        assert_eq!(
            config.splitter.recursive.overlap,
            deserialized.splitter.recursive.overlap
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
            [splitter]
            method = "word"

            [splitter.word]
            num_words = 10

            [conversion.overrides]
            DOCX = "pdf"
            "#
        )
        .unwrap();

        let path = temp_file.path().to_path_buf();
        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.splitter.method, "word");
        assert_eq!(config.splitter.word.num_words, 10);
        // Defaults should still work
        assert_eq!(config.splitter.sentence.num_sentences, 5);
        // Override keys are normalized when building the lookup map
        assert_eq!(config.conversion.to_map().resolve("docx"), "pdf");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(&PathBuf::from("/nonexistent/sift.toml")).unwrap();
        assert_eq!(config.extraction.default, "none");
    }

    #[test]
    fn test_default_config_string_parses() {
        let config: Config = toml::from_str(&Config::default_config_string()).unwrap();
        assert_eq!(config.extraction.default, "markdown");
        assert_eq!(config.extraction.to_map().resolve("PDF"), "pdf");
        assert_eq!(config.splitter.schema_based.header_lines, 1);
    }
}
