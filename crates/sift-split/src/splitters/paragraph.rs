//! Paragraph-grouped splitting.

use super::Splitter;
use crate::error::SplitResult;

/// Treats blank-line-separated blocks as paragraphs and regroups them into
/// chunks of `num_paragraphs`, joined by blank lines.
pub struct ParagraphSplitter {
    num_paragraphs: usize,
}

impl ParagraphSplitter {
    pub fn new(num_paragraphs: usize) -> Self {
        Self { num_paragraphs }
    }
}

impl Splitter for ParagraphSplitter {
    fn split(&self, text: &str) -> SplitResult<Vec<String>> {
        let paragraphs = split_paragraphs(text);

        let chunks = paragraphs
            .chunks(self.num_paragraphs)
            .map(|group| group.join("\n\n"))
            .collect();
        Ok(chunks)
    }
}

/// Collect runs of non-blank lines; one or more blank lines end a paragraph.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_separate_paragraphs() {
        let text = "para one\nstill one\n\npara two\n\n\npara three";
        let paragraphs = split_paragraphs(text);
        assert_eq!(
            paragraphs,
            vec!["para one\nstill one", "para two", "para three"]
        );
    }

    #[test]
    fn test_groups_of_n_paragraphs() {
        let text = "a\n\nb\n\nc\n\nd\n\ne";
        let splitter = ParagraphSplitter::new(2);
        let chunks = splitter.split(text).unwrap();

        assert_eq!(chunks, vec!["a\n\nb", "c\n\nd", "e"]);
    }

    #[test]
    fn test_chunk_count_is_ceil_of_units() {
        let text = "a\n\nb\n\nc\n\nd\n\ne\n\nf\n\ng";
        let splitter = ParagraphSplitter::new(3);
        let chunks = splitter.split(text).unwrap();

        // ceil(7 / 3) = 3
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        let paragraphs = split_paragraphs("a\n   \nb");
        assert_eq!(paragraphs, vec!["a", "b"]);
    }
}
