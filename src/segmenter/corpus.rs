use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

/// Shortest word kept in the reference set
pub const MIN_REFERENCE_WORD_LEN: usize = 4;

// Cells a dataframe reader treats as missing rather than as text
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Reads the `word` column of a word-frequency CSV in file order
///
/// Missing cells are skipped, so every returned entry is real text.
pub fn read_ranked_words<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let word_idx = csv_reader
        .headers()
        .context("Failed to read corpus header")?
        .iter()
        .position(|h| h == "word")
        .ok_or_else(|| anyhow!("corpus has no 'word' column"))?;

    let mut words = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed corpus row {}", row + 1))?;
        match record.get(word_idx) {
            Some(word) if !NA_TOKENS.contains(&word) => words.push(word.to_string()),
            _ => debug!("Skipping non-text corpus cell at row {}", row + 1),
        }
    }
    Ok(words)
}

/// Loads the ranked word column from a CSV file on disk
pub fn load_ranked_words(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open corpus {}", path.display()))?;
    read_ranked_words(file).with_context(|| format!("Failed to read corpus {}", path.display()))
}

/// Known dictionary words, read-only once loaded
#[derive(Debug, Clone, Default)]
pub struct ReferenceWordSet {
    words: HashSet<String>,
}

impl ReferenceWordSet {
    /// Keeps words of at least four characters
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .filter(|w| w.chars().count() >= MIN_REFERENCE_WORD_LEN)
            .collect();
        Self { words }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let set = Self::from_words(load_ranked_words(path)?);
        info!("Loaded {} reference words from {}", set.len(), path.display());
        Ok(set)
    }

    /// Case-sensitive membership
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "word,count\nthe,100\ngoogle,90\nnull,80\nNaN,70\n,60\nsecure,50\n1234,40\npay,30\n";

    #[test]
    fn test_read_ranked_words_skips_missing_cells() {
        let words = read_ranked_words(CSV.as_bytes()).unwrap();
        assert_eq!(words, vec!["the", "google", "secure", "1234", "pay"]);
    }

    #[test]
    fn test_read_ranked_words_finds_column_by_name() {
        let words = read_ranked_words("count,word\n5,login\n4,mail\n".as_bytes()).unwrap();
        assert_eq!(words, vec!["login", "mail"]);
    }

    #[test]
    fn test_read_ranked_words_requires_word_column() {
        let err = read_ranked_words("term,count\nx,1\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'word'"));
    }

    #[test]
    fn test_reference_set_filters_short_words() {
        let set = ReferenceWordSet::from_words(read_ranked_words(CSV.as_bytes()).unwrap());
        assert_eq!(set.len(), 3);
        assert!(set.contains("google"));
        assert!(set.contains("1234"));
        assert!(!set.contains("the"));
        assert!(!set.contains("pay"));
        assert!(!set.contains("null"));
    }

    #[test]
    fn test_reference_set_is_case_sensitive() {
        let set = ReferenceWordSet::from_words(["google"]);
        assert!(set.contains("google"));
        assert!(!set.contains("Google"));
    }
}
