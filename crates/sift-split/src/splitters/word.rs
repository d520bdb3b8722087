//! Word-grouped splitting.

use super::Splitter;
use crate::error::SplitResult;

/// Tokenizes on whitespace and regroups the words into chunks of
/// `num_words`, joined by single spaces. A final partial group is kept.
pub struct WordSplitter {
    num_words: usize,
}

impl WordSplitter {
    pub fn new(num_words: usize) -> Self {
        Self { num_words }
    }
}

impl Splitter for WordSplitter {
    fn split(&self, text: &str) -> SplitResult<Vec<String>> {
        let words: Vec<&str> = text.split_whitespace().collect();

        let chunks = words
            .chunks(self.num_words)
            .map(|group| group.join(" "))
            .collect();
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_of_n_words() {
        let splitter = WordSplitter::new(3);
        let chunks = splitter.split("one two three four five six seven").unwrap();

        assert_eq!(chunks, vec!["one two three", "four five six", "seven"]);
    }

    #[test]
    fn test_chunk_count_is_ceil_of_units() {
        let text = (0..10).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let splitter = WordSplitter::new(4);
        let chunks = splitter.split(&text).unwrap();

        // ceil(10 / 4) = 3
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].split_whitespace().count(), 4);
        assert_eq!(chunks[1].split_whitespace().count(), 4);
        assert_eq!(chunks[2].split_whitespace().count(), 2);
    }

    #[test]
    fn test_irregular_whitespace_collapses() {
        let splitter = WordSplitter::new(2);
        let chunks = splitter.split("a\tb\n\nc   d").unwrap();
        assert_eq!(chunks, vec!["a b", "c d"]);
    }
}
