use once_cell::sync::Lazy;
use regex::Regex;

/// Dotted quad anywhere in a domain, bounded by a dot or the ends
pub static IPV4_LIKE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|\.)\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}($|\.)").unwrap()
});

/// A whole host that is an IPv4 address with octets in range
pub static STRICT_IPV4_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$")
        .unwrap()
});

/// Letter runs, digit runs, or any other single character
pub static CHAR_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z]+|\d+|[^a-zA-Z\d]").unwrap()
});
