//! Sentence-grouped splitting.

use super::Splitter;
use crate::error::SplitResult;

/// Detects sentence boundaries at terminal punctuation followed by
/// whitespace and regroups sentences into chunks of `num_sentences`,
/// joined by single spaces.
pub struct SentenceSplitter {
    num_sentences: usize,
}

impl SentenceSplitter {
    pub fn new(num_sentences: usize) -> Self {
        Self { num_sentences }
    }
}

impl Splitter for SentenceSplitter {
    fn split(&self, text: &str) -> SplitResult<Vec<String>> {
        let sentences = split_sentences(text);

        let chunks = sentences
            .chunks(self.num_sentences)
            .map(|group| group.join(" "))
            .collect();
        Ok(chunks)
    }
}

/// Split text at `.`, `!` or `?` when followed by whitespace or end of
/// input. Text with no boundary at all is one sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if c == '.' || c == '!' || c == '?' {
            let next_idx = i + c.len_utf8();
            let at_boundary = next_idx >= text.len()
                || text[next_idx..]
                    .chars()
                    .next()
                    .map(char::is_whitespace)
                    .unwrap_or(true);
            if at_boundary {
                let sentence = text[start..next_idx].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = next_idx;
            }
        }
    }

    let remaining = text[start..].trim();
    if !remaining.is_empty() {
        sentences.push(remaining);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_of_n_sentences() {
        let text = "First. Second! Third? Fourth. Fifth.";
        let splitter = SentenceSplitter::new(2);
        let chunks = splitter.split(text).unwrap();

        assert_eq!(chunks, vec!["First. Second!", "Third? Fourth.", "Fifth."]);
    }

    #[test]
    fn test_chunk_count_is_ceil_of_units() {
        let text = "A. B. C. D. E. F. G.";
        let splitter = SentenceSplitter::new(3);
        let chunks = splitter.split(text).unwrap();

        // ceil(7 / 3) = 3
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_abbreviation_period_mid_token_is_not_a_boundary() {
        // The dot in "3.14" is not followed by whitespace.
        let sentences = split_sentences("Pi is 3.14 roughly. Indeed.");
        assert_eq!(sentences, vec!["Pi is 3.14 roughly.", "Indeed."]);
    }

    #[test]
    fn test_text_without_terminator_is_single_sentence() {
        let sentences = split_sentences("no punctuation here");
        assert_eq!(sentences, vec!["no punctuation here"]);
    }
}
