use crate::error::{FeatureError, Result};
use super::patterns::CHAR_RUN_REGEX;

/// Fraction of a domain's characters that sit inside stable character runs
///
/// The domain (minus a leading `www.`) is cut into letter runs, digit runs
/// and single other characters. The last two runs, normally the TLD and its
/// dot, are dropped. Three or more remaining runs are scored by how many run
/// boundaries they contain, with a trailing `.` boundary counted twice.
pub fn char_continuation_rate(domain: &str) -> Result<f64> {
    let domain = domain.strip_prefix("www.").unwrap_or(domain);

    let mut runs: Vec<&str> = CHAR_RUN_REGEX.find_iter(domain).map(|m| m.as_str()).collect();
    runs.truncate(runs.len().saturating_sub(2));

    if runs.len() <= 2 {
        return Ok(1.0);
    }

    let mut switches = runs.len();
    if runs[runs.len() - 2] == "." {
        switches += 1;
    }

    let total: usize = runs.iter().map(|r| r.chars().count()).sum();
    if total == 0 {
        return Err(FeatureError::DivisionByZero { field: "CharContinuationRate" });
    }
    Ok((total as f64 - (switches as f64 - 2.0)) / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_domains_are_fully_continuous() {
        assert_eq!(char_continuation_rate("www.google.com").unwrap(), 1.0);
        assert_eq!(char_continuation_rate("www.abc123.xyz").unwrap(), 1.0);
        assert_eq!(char_continuation_rate("").unwrap(), 1.0);
        assert_eq!(char_continuation_rate("localhost").unwrap(), 1.0);
    }

    #[test]
    fn test_fragmented_domain_with_dot_boundary() {
        // paypal - secure . login . example | . com
        let rate = char_continuation_rate("www.paypal-secure.login.example.com").unwrap();
        assert!((rate - 21.0 / 27.0).abs() < 1e-12);
    }

    #[test]
    fn test_fragmented_domain_without_dot_boundary() {
        // mail . example 2 | . com
        let rate = char_continuation_rate("mail.example2.com").unwrap();
        assert!((rate - 11.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_only_leading_www_is_stripped() {
        let with = char_continuation_rate("www.a-b.c.com").unwrap();
        let without = char_continuation_rate("a-b.c.com").unwrap();
        assert_eq!(with, without);
    }
}
