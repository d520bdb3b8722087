//! Validated splitter configuration.
//!
//! Parameters are checked when the config is constructed, never at split
//! time: a config that exists is a config that can run.

use crate::error::{SplitError, SplitResult};
use crate::splitters::DEFAULT_SEPARATORS;
use sift_config::SplitterSettings;

/// Strategy selection plus its validated parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitterConfig {
    Word {
        num_words: usize,
    },
    Sentence {
        num_sentences: usize,
    },
    Paragraph {
        num_paragraphs: usize,
    },
    Fixed {
        size: usize,
    },
    Recursive {
        size: usize,
        overlap: usize,
        separators: Vec<String>,
    },
    SchemaBased {
        max_chunk_size: usize,
        max_num_rows: usize,
        header_lines: usize,
    },
}

impl SplitterConfig {
    pub fn word(num_words: usize) -> SplitResult<Self> {
        require_positive("num_words", num_words)?;
        Ok(Self::Word { num_words })
    }

    pub fn sentence(num_sentences: usize) -> SplitResult<Self> {
        require_positive("num_sentences", num_sentences)?;
        Ok(Self::Sentence { num_sentences })
    }

    pub fn paragraph(num_paragraphs: usize) -> SplitResult<Self> {
        require_positive("num_paragraphs", num_paragraphs)?;
        Ok(Self::Paragraph { num_paragraphs })
    }

    pub fn fixed(size: usize) -> SplitResult<Self> {
        require_positive("size", size)?;
        Ok(Self::Fixed { size })
    }

    /// `overlap` must be strictly smaller than `size`: a window that repeats
    /// itself whole can never advance.
    pub fn recursive(
        size: usize,
        overlap: usize,
        separators: Option<Vec<String>>,
    ) -> SplitResult<Self> {
        require_positive("size", size)?;
        require_positive("overlap", overlap)?;
        if overlap >= size {
            return Err(SplitError::InvalidConfig(format!(
                "overlap ({overlap}) must be smaller than size ({size})"
            )));
        }
        let separators = separators
            .unwrap_or_else(|| DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect());
        Ok(Self::Recursive {
            size,
            overlap,
            separators,
        })
    }

    pub fn schema_based(
        max_chunk_size: usize,
        max_num_rows: usize,
        header_lines: usize,
    ) -> SplitResult<Self> {
        require_positive("max_chunk_size", max_chunk_size)?;
        require_positive("max_num_rows", max_num_rows)?;
        Ok(Self::SchemaBased {
            max_chunk_size,
            max_num_rows,
            header_lines,
        })
    }

    /// Build a config from the settings file, honouring the selected method.
    pub fn from_settings(settings: &SplitterSettings) -> SplitResult<Self> {
        match settings.method.as_str() {
            "word" => Self::word(settings.word.num_words),
            "sentence" => Self::sentence(settings.sentence.num_sentences),
            "paragraph" => Self::paragraph(settings.paragraph.num_paragraphs),
            "fixed" => Self::fixed(settings.fixed.size),
            "recursive" => Self::recursive(
                settings.recursive.size,
                settings.recursive.overlap,
                settings.recursive.separators.clone(),
            ),
            "schema-based" => Self::schema_based(
                settings.schema_based.max_chunk_size,
                settings.schema_based.max_num_rows,
                settings.schema_based.header_lines,
            ),
            other => Err(SplitError::UnknownMethod(other.to_string())),
        }
    }

    /// The method name this config was built from.
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::Word { .. } => "word",
            Self::Sentence { .. } => "sentence",
            Self::Paragraph { .. } => "paragraph",
            Self::Fixed { .. } => "fixed",
            Self::Recursive { .. } => "recursive",
            Self::SchemaBased { .. } => "schema-based",
        }
    }
}

fn require_positive(name: &str, value: usize) -> SplitResult<()> {
    if value == 0 {
        return Err(SplitError::InvalidConfig(format!(
            "{name} must be greater than 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_parameters_rejected() {
        assert!(SplitterConfig::word(0).is_err());
        assert!(SplitterConfig::sentence(0).is_err());
        assert!(SplitterConfig::paragraph(0).is_err());
        assert!(SplitterConfig::fixed(0).is_err());
        assert!(SplitterConfig::recursive(0, 1, None).is_err());
        assert!(SplitterConfig::recursive(10, 0, None).is_err());
        assert!(SplitterConfig::schema_based(0, 10, 1).is_err());
        assert!(SplitterConfig::schema_based(300, 0, 1).is_err());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        assert!(SplitterConfig::recursive(10, 10, None).is_err());
        assert!(SplitterConfig::recursive(10, 11, None).is_err());
        assert!(SplitterConfig::recursive(10, 9, None).is_ok());
    }

    #[test]
    fn test_unknown_method_fails_at_construction() {
        let mut settings = SplitterSettings::default();
        settings.method = "semantic".to_string();
        let err = SplitterConfig::from_settings(&settings).unwrap_err();
        assert!(matches!(err, SplitError::UnknownMethod(_)));
    }

    #[test]
    fn test_from_settings_picks_selected_method() {
        let mut settings = SplitterSettings::default();
        settings.method = "word".to_string();
        settings.word.num_words = 7;
        let config = SplitterConfig::from_settings(&settings).unwrap();
        assert_eq!(config, SplitterConfig::Word { num_words: 7 });
        assert_eq!(config.method_name(), "word");
    }

    #[test]
    fn test_recursive_defaults_separators() {
        let config = SplitterConfig::recursive(100, 10, None).unwrap();
        match config {
            SplitterConfig::Recursive { separators, .. } => {
                assert_eq!(separators[0], "\n\n");
                assert_eq!(separators.last().map(String::as_str), Some(""));
            }
            _ => unreachable!(),
        }
    }
}
