pub mod charclass;
pub mod continuation;
pub mod patterns;
pub mod vector;

use tracing::{debug, instrument};

use crate::error::{checked_ratio, Result};
use crate::segmenter::WordScorer;
use crate::url_parser::{is_https, ParsedUrl, SuffixList};

pub use charclass::{is_alphanumeric, is_digit};
pub use continuation::char_continuation_rate;
pub use patterns::IPV4_LIKE_REGEX;
pub use vector::{FeatureVector, FEATURE_COLUMNS, FEATURE_COUNT};

/// Turns URLs into classifier feature vectors
///
/// Holds the suffix list and word scorer that every request reads. Both are
/// built once and never mutated, so a shared extractor needs no locking.
#[derive(Debug)]
pub struct FeatureExtractor {
    suffixes: SuffixList,
    scorer: WordScorer,
}

impl FeatureExtractor {
    pub fn new(suffixes: SuffixList, scorer: WordScorer) -> Self {
        Self { suffixes, scorer }
    }

    pub fn scorer(&self) -> &WordScorer {
        &self.scorer
    }

    /// Computes the feature vector of a URL
    ///
    /// Subdomain and word features come from the domain as written; the
    /// character statistics use the `www.`-normalized domain.
    ///
    /// # Errors
    /// * `MalformedUrl` - the network location cannot be split
    /// * `DivisionByZero` - the URL has no network location
    #[instrument(level = "debug", skip(self))]
    pub fn preprocess_url(&self, url: &str) -> Result<FeatureVector> {
        let parsed = ParsedUrl::new(url, &self.suffixes)?;
        let score = self.scorer.compute_ratio(&parsed.core_domain);
        let domain = normalize_domain(&parsed.domain);

        let domain_len = domain.chars().count();
        let digits_in_domain = count_digits(&domain);
        let other_special_in_domain = domain.chars().filter(|&c| !is_alphanumeric(c)).count();

        let features = FeatureVector {
            digits_first_subdomain: count_digits(&parsed.first_subdomain),
            length_first_subdomain: parsed.first_subdomain.chars().count(),
            is_domain_ip: u8::from(is_domain_ip(&domain)),
            digits_in_domain,
            digit_ratio_in_domain: checked_ratio(digits_in_domain, domain_len, "DigitRatioInDomain")?,
            hyphens_in_domain: domain.matches('-').count(),
            other_special_in_domain,
            special_char_ratio_in_domain: checked_ratio(
                other_special_in_domain,
                domain_len,
                "SpecialCharRatioInDomain",
            )?,
            char_continuation_rate: char_continuation_rate(&domain)?,
            is_https: u8::from(is_https(url)),
            ratio_nlp: score.ratio,
            common_words: score.common_words,
        };

        debug!("Features for {}: {:?}", domain, features);
        Ok(features)
    }
}

/// Prefixes `www.` to two-label domains that do not already start with it
pub fn normalize_domain(domain: &str) -> String {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() == 2 && labels[0] != "www" {
        format!("www.{}", domain)
    } else {
        domain.to_string()
    }
}

/// Whether a domain contains a dotted-quad IPv4 literal
pub fn is_domain_ip(domain: &str) -> bool {
    IPV4_LIKE_REGEX.is_match(domain)
}

fn count_digits(s: &str) -> usize {
    s.chars().filter(|&c| is_digit(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeatureError;
    use crate::test_support;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("example.com"), "www.example.com");
        assert_eq!(normalize_domain("example.com:8080"), "www.example.com:8080");
        assert_eq!(normalize_domain("www.com"), "www.com");
        assert_eq!(normalize_domain("www.example.com"), "www.example.com");
        assert_eq!(normalize_domain("a.b.example.com"), "a.b.example.com");
        assert_eq!(normalize_domain("localhost"), "localhost");
        assert_eq!(normalize_domain(""), "");
    }

    #[test]
    fn test_is_domain_ip() {
        assert!(is_domain_ip("192.168.1.1"));
        assert!(is_domain_ip("www.10.0.0.1.nip.io"));
        assert!(!is_domain_ip("example.com"));
        assert!(!is_domain_ip("192.168.1.1:8080"));
        assert!(!is_domain_ip("1.2.3"));
    }

    #[test]
    fn test_google_features() {
        let extractor = test_support::extractor();
        let f = extractor.preprocess_url("https://www.google.com").unwrap();

        assert_eq!(f.length_first_subdomain, 3);
        assert_eq!(f.digits_first_subdomain, 0);
        assert_eq!(f.is_domain_ip, 0);
        assert_eq!(f.digits_in_domain, 0);
        assert_eq!(f.digit_ratio_in_domain, 0.0);
        assert_eq!(f.hyphens_in_domain, 0);
        assert_eq!(f.other_special_in_domain, 2);
        assert_eq!(f.special_char_ratio_in_domain, 2.0 / 14.0);
        assert_eq!(f.char_continuation_rate, 1.0);
        assert_eq!(f.is_https, 1);
        assert_eq!(f.ratio_nlp, 6.0);
        assert_eq!(f.common_words, 1);
    }

    #[test]
    fn test_two_label_domain_is_normalized_before_statistics() {
        let extractor = test_support::extractor();
        let f = extractor.preprocess_url("http://paypal-login.com/verify").unwrap();

        // Subdomain features use the domain as written
        assert_eq!(f.length_first_subdomain, 0);
        // "www.paypal-login.com" has three dots and a hyphen
        assert_eq!(f.hyphens_in_domain, 1);
        assert_eq!(f.other_special_in_domain, 3);
        assert_eq!(f.special_char_ratio_in_domain, 3.0 / 20.0);
        assert_eq!(f.is_https, 0);
        assert_eq!(f.common_words, 2);
    }

    #[test]
    fn test_ip_literal_host() {
        let extractor = test_support::extractor();
        let f = extractor.preprocess_url("http://192.168.0.1/login").unwrap();

        assert_eq!(f.is_domain_ip, 1);
        assert_eq!(f.is_https, 0);
        assert_eq!(f.length_first_subdomain, 3);
        assert_eq!(f.digits_first_subdomain, 3);
        assert_eq!(f.digits_in_domain, 8);
        assert_eq!(f.digit_ratio_in_domain, 8.0 / 11.0);
        assert_eq!(f.common_words, 0);
        assert_eq!(f.ratio_nlp, 0.0);
    }

    #[test]
    fn test_digits_in_first_subdomain() {
        let extractor = test_support::extractor();
        let f = extractor.preprocess_url("https://login2024.secure-bank.xyz/").unwrap();

        assert_eq!(f.length_first_subdomain, 9);
        assert_eq!(f.digits_first_subdomain, 4);
        assert_eq!(f.hyphens_in_domain, 1);
    }

    #[test]
    fn test_numerals_that_are_not_digits() {
        let extractor = test_support::extractor();
        let f = extractor.preprocess_url("http://ⅷ½.com/").unwrap();

        assert_eq!(f.digits_in_domain, 0);
        assert_eq!(f.digit_ratio_in_domain, 0.0);
        // Only the dots of "www.ⅷ½.com"
        assert_eq!(f.other_special_in_domain, 2);
    }

    #[test]
    fn test_combining_marks_are_special_characters() {
        let extractor = test_support::extractor();
        let f = extractor.preprocess_url("http://हिंदी.com/").unwrap();

        // Two dots and three vowel signs
        assert_eq!(f.other_special_in_domain, 5);
        assert_eq!(f.special_char_ratio_in_domain, 5.0 / 13.0);
    }

    #[test]
    fn test_non_ascii_digits() {
        let extractor = test_support::extractor();
        let f = extractor.preprocess_url("http://٣①x.example.com/").unwrap();

        assert_eq!(f.digits_first_subdomain, 2);
        assert_eq!(f.digits_in_domain, 2);
    }

    #[test]
    fn test_empty_url_divides_by_zero() {
        let extractor = test_support::extractor();
        assert_eq!(
            extractor.preprocess_url(""),
            Err(FeatureError::DivisionByZero { field: "DigitRatioInDomain" })
        );
        assert!(extractor.preprocess_url("example.com").is_err());
    }

    #[test]
    fn test_malformed_url() {
        let extractor = test_support::extractor();
        assert!(matches!(
            extractor.preprocess_url("https://[fe80::1/path"),
            Err(FeatureError::MalformedUrl { .. })
        ));
    }

    #[test]
    fn test_single_label_host_is_total() {
        let extractor = test_support::extractor();
        let f = extractor.preprocess_url("http://localhost:8080/").unwrap();
        assert_eq!(f.length_first_subdomain, 0);
        assert_eq!(f.other_special_in_domain, 1);
        assert_eq!(f.char_continuation_rate, 1.0);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = test_support::extractor();
        let url = "https://secure-paypal.account-update.info/login?id=42";
        assert_eq!(extractor.preprocess_url(url), extractor.preprocess_url(url));
    }
}
