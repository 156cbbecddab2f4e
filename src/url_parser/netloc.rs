use std::net::Ipv6Addr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{error, trace};

use crate::error::{FeatureError, Result};

// Bracketed hosts of the form `vX.anything` (IPvFuture)
static IPV_FUTURE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\Av[a-fA-F0-9]+\..+\z").unwrap()
});

// Characters allowed in a scheme after the leading letter
const SCHEME_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789+-.";

// Stripped anywhere in the input before splitting
const UNSAFE_URL_CHARS: [char; 3] = ['\t', '\r', '\n'];

/// Extracts the network location (host, optional port and userinfo) of a URL
///
/// The split is lenient: a netloc exists only when the text after an optional
/// `scheme:` prefix starts with `//`, and it runs up to the first `/`, `?` or
/// `#`. Inputs without one yield an empty string. Case is preserved.
///
/// # Errors
/// * `FeatureError::MalformedUrl` - the netloc has an unmatched `[` or `]`,
///   or its bracketed host is not an IPv6 or IPvFuture address
pub fn extract_domain(url: &str) -> Result<String> {
    let cleaned: String = url
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !UNSAFE_URL_CHARS.contains(c))
        .collect();

    let rest = strip_scheme(&cleaned);
    let Some(after_slashes) = rest.strip_prefix("//") else {
        trace!("No network location in '{}'", url);
        return Ok(String::new());
    };

    let end = after_slashes
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(after_slashes.len());
    let netloc = &after_slashes[..end];

    if netloc.contains('[') != netloc.contains(']') {
        error!("Unbalanced IPv6 brackets in network location: {}", netloc);
        return Err(FeatureError::MalformedUrl { netloc: netloc.to_string() });
    }

    if netloc.contains('[') && !is_valid_bracketed_netloc(netloc) {
        error!("Invalid bracketed host in network location: {}", netloc);
        return Err(FeatureError::MalformedUrl { netloc: netloc.to_string() });
    }

    Ok(netloc.to_string())
}

/// Checks the `[host]:port` shape after any userinfo
///
/// Nothing may precede the `[`, only a `:port` may follow the `]`, and the
/// host must be IPv6 (with an optional `%zone`) or IPvFuture.
fn is_valid_bracketed_netloc(netloc: &str) -> bool {
    let host_and_port = netloc.rsplit('@').next().unwrap_or(netloc);
    let Some((before, bracketed)) = host_and_port.split_once('[') else {
        return true;
    };
    if !before.is_empty() {
        return false;
    }

    let (host, port) = bracketed.split_once(']').unwrap_or((bracketed, ""));
    if !port.is_empty() && !port.starts_with(':') {
        return false;
    }

    if host.starts_with('v') {
        return IPV_FUTURE_REGEX.is_match(host);
    }
    let address = match host.split_once('%') {
        Some((_, "")) => return false,
        Some((address, _)) => address,
        None => host,
    };
    address.parse::<Ipv6Addr>().is_ok()
}

/// Returns the input with a leading `scheme:` removed, if it has one
fn strip_scheme(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };
    let candidate = &url[..colon];
    let starts_with_letter = candidate
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic());

    if starts_with_letter && candidate.chars().all(|c| SCHEME_CHARS.contains(c)) {
        &url[colon + 1..]
    } else {
        url
    }
}

/// Whether the raw URL text starts with `https`
pub fn is_https(url: &str) -> bool {
    url.starts_with("https")
}
