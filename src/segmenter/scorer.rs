use tracing::trace;

use super::corpus::ReferenceWordSet;
use super::model::LanguageModel;

// Tokens must be longer than this to count as real words
const MIN_ACTUAL_WORD_LEN: usize = 3;

/// How word-like a domain's core string is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordScore {
    pub ratio: f64,          // Squared real-word lengths over length times token count
    pub common_words: usize, // Real words found in the reference set
}

/// Scores domain strings against a segmentation model and a reference word set
#[derive(Debug, Clone)]
pub struct WordScorer {
    model: LanguageModel,
    reference: ReferenceWordSet,
}

impl WordScorer {
    pub fn new(model: LanguageModel, reference: ReferenceWordSet) -> Self {
        Self { model, reference }
    }

    /// Segments `core_domain` and scores the real words among the tokens
    ///
    /// A real word is alphabetic and longer than three characters. The ratio
    /// divides by the count of all tokens, not only real words, and is 0 when
    /// segmentation yields nothing.
    pub fn compute_ratio(&self, core_domain: &str) -> WordScore {
        let tokens = self.model.split(core_domain);
        let actual_words: Vec<&str> = tokens
            .iter()
            .copied()
            .filter(|t| t.chars().count() > MIN_ACTUAL_WORD_LEN && t.chars().all(char::is_alphabetic))
            .collect();

        let common_words = actual_words
            .iter()
            .filter(|w| self.reference.contains(w))
            .count();

        let ratio = if tokens.is_empty() {
            0.0
        } else {
            let squared: usize = actual_words.iter().map(|w| w.chars().count().pow(2)).sum();
            squared as f64 / (core_domain.chars().count() * tokens.len()) as f64
        };

        trace!(
            "Scored '{}': tokens={:?} ratio={} common_words={}",
            core_domain, tokens, ratio, common_words
        );
        WordScore { ratio, common_words }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> WordScorer {
        let model = LanguageModel::from_ranked_words([
            "paypal", "secure", "login", "the", "google", "mail", "pay", "pal",
        ])
        .unwrap();
        WordScorer::new(model, ReferenceWordSet::from_words(["paypal", "login", "google", "mail"]))
    }

    #[test]
    fn test_compute_ratio_all_words() {
        let score = scorer().compute_ratio("paypalsecurelogin");
        // (36 + 36 + 25) / (17 * 3)
        assert!((score.ratio - 97.0 / 51.0).abs() < 1e-12);
        assert_eq!(score.common_words, 2);
    }

    #[test]
    fn test_compute_ratio_single_word() {
        let score = scorer().compute_ratio("google");
        assert_eq!(score.ratio, 6.0);
        assert_eq!(score.common_words, 1);
    }

    #[test]
    fn test_compute_ratio_counts_short_tokens_in_denominator() {
        // "the" is a token but not a real word
        let score = scorer().compute_ratio("thegoogle");
        assert!((score.ratio - 36.0 / 18.0).abs() < 1e-12);
        assert_eq!(score.common_words, 1);
    }

    #[test]
    fn test_compute_ratio_membership_is_case_sensitive() {
        let score = scorer().compute_ratio("Google");
        assert_eq!(score.ratio, 6.0);
        assert_eq!(score.common_words, 0);
    }

    #[test]
    fn test_compute_ratio_no_tokens() {
        let score = scorer().compute_ratio("");
        assert_eq!(score, WordScore { ratio: 0.0, common_words: 0 });
    }

    #[test]
    fn test_compute_ratio_digits_only() {
        let score = scorer().compute_ratio("192.168.0.1");
        assert_eq!(score.ratio, 0.0);
        assert_eq!(score.common_words, 0);
    }
}
