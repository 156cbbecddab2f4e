use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, trace};

// Anything outside this class separates independently segmented pieces
static PIECE_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zA-Z0-9']+").unwrap()
});

/// Zipf-cost unigram model used to split run-together text into words
///
/// Words are ranked by descending frequency. The word at rank `i` costs
/// `ln((i + 1) * ln(N))`, so frequent words are cheap and unknown strings
/// are infinitely expensive.
#[derive(Debug, Clone)]
pub struct LanguageModel {
    word_cost: HashMap<String, f64>,
    max_word_len: usize,
}

impl LanguageModel {
    /// Builds a model from words ordered most frequent first
    ///
    /// A later duplicate overrides the cost of an earlier one.
    pub fn from_ranked_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        if words.len() < 2 {
            bail!("language model needs at least two words, got {}", words.len());
        }

        let log_n = (words.len() as f64).ln();
        let mut word_cost = HashMap::with_capacity(words.len());
        let mut max_word_len = 0;
        for (rank, word) in words.into_iter().enumerate() {
            max_word_len = max_word_len.max(word.len());
            word_cost.insert(word, ((rank + 1) as f64 * log_n).ln());
        }

        debug!("Language model built: {} words, longest {}", word_cost.len(), max_word_len);
        Ok(Self { word_cost, max_word_len })
    }

    /// Reads a whitespace-separated, frequency-ordered word list
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text).context("Word list is not valid UTF-8 text")?;
        Self::from_ranked_words(text.split_whitespace())
    }

    /// Loads a word list file, gunzipping it when the name ends in `.gz`
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open word list {}", path.display()))?;
        let reader = BufReader::new(file);

        let model = if path.extension().map_or(false, |ext| ext == "gz") {
            Self::from_reader(GzDecoder::new(reader))
        } else {
            Self::from_reader(reader)
        }
        .with_context(|| format!("Invalid word list {}", path.display()))?;

        info!("Loaded segmentation word list from {} ({} words)", path.display(), model.len());
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.word_cost.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_cost.is_empty()
    }

    /// Splits text into the most probable sequence of words
    ///
    /// Characters outside `[a-zA-Z0-9']` separate pieces that are segmented
    /// on their own. Tokens keep the case of the input.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        PIECE_SEPARATOR_REGEX
            .split(text)
            .flat_map(|piece| self.split_piece(piece))
            .collect()
    }

    fn cost_of(&self, word: &str) -> f64 {
        self.word_cost
            .get(&word.to_ascii_lowercase())
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    // Cheapest (cost, length) of a word ending at byte `end`; ties go to the shorter word
    fn best_match(&self, piece: &str, cost: &[f64], end: usize) -> (f64, usize) {
        let mut best = (f64::INFINITY, 0);
        for k in 1..=end.min(self.max_word_len) {
            let candidate = cost[end - k] + self.cost_of(&piece[end - k..end]);
            if best.1 == 0 || candidate < best.0 {
                best = (candidate, k);
            }
        }
        best
    }

    // Pieces only contain ASCII, so byte offsets are char offsets
    fn split_piece<'a>(&self, piece: &'a str) -> Vec<&'a str> {
        if piece.is_empty() {
            return Vec::new();
        }

        let mut cost = Vec::with_capacity(piece.len() + 1);
        cost.push(0.0);
        for end in 1..=piece.len() {
            let (c, _) = self.best_match(piece, &cost, end);
            cost.push(c);
        }

        let bytes = piece.as_bytes();
        let mut out: Vec<&'a str> = Vec::new();
        let mut end = piece.len();
        while end > 0 {
            let (_, k) = self.best_match(piece, &cost, end);
            let token = &piece[end - k..end];
            let mut new_token = true;

            // The last emitted token always starts at `end`
            if token != "'" {
                if let Some(last) = out.last_mut() {
                    let ends_with_digit = bytes[end - 1].is_ascii_digit();
                    let next_starts_with_digit = last.as_bytes().first().is_some_and(u8::is_ascii_digit);
                    if *last == "'s" || (ends_with_digit && next_starts_with_digit) {
                        *last = &piece[end - k..end + last.len()];
                        new_token = false;
                    }
                }
            }

            if new_token {
                out.push(token);
            }
            end -= k;
        }

        out.reverse();
        trace!("Segmented '{}' into {:?}", piece, out);
        out
    }
}
