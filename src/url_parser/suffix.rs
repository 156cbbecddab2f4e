use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use publicsuffix::{List, Psl};
use tracing::{debug, info, trace};
use url::Host;

use crate::features::patterns::STRICT_IPV4_REGEX;

// Everything after this marker is registry-operated private suffixes, which
// are not treated as public suffixes when splitting hosts
const PRIVATE_SECTION_MARKER: &str = "===BEGIN PRIVATE DOMAINS===";

/// A host split into subdomain, registrable name and public suffix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainParts {
    pub subdomain: String, // Labels left of the registrable name, dot-joined
    pub domain: String,    // Registrable name without its suffix
    pub suffix: String,    // Public suffix, empty when the TLD is unknown
}

impl DomainParts {
    /// Subdomain and registrable name joined by `.`, with a leading `www.` removed
    pub fn core_domain(&self) -> String {
        let joined = [self.subdomain.as_str(), self.domain.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(".");

        match joined.strip_prefix("www.") {
            Some(stripped) => stripped.to_string(),
            None => joined,
        }
    }
}

/// Public suffix list used to tell registrable names apart from subdomains
pub struct SuffixList {
    list: List,
}

impl std::fmt::Debug for SuffixList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuffixList").finish_non_exhaustive()
    }
}

impl SuffixList {
    /// Loads a list in the publicsuffix.org `.dat` format from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read public suffix list {}", path.display()))?;
        let list = Self::from_text(&text)
            .with_context(|| format!("Failed to parse public suffix list {}", path.display()))?;
        info!("Loaded public suffix list from {}", path.display());
        Ok(list)
    }

    /// Parses list text, keeping only the ICANN section
    pub fn from_text(text: &str) -> Result<Self> {
        let icann = match text.find(PRIVATE_SECTION_MARKER) {
            Some(idx) => &text[..idx],
            None => text,
        };
        let list: List = icann
            .parse()
            .map_err(|e| anyhow!("invalid public suffix list: {:?}", e))?;
        Ok(Self { list })
    }

    /// Splits a network location into its domain parts
    ///
    /// Userinfo, port and trailing root dots are ignored. Unknown TLDs give an
    /// empty suffix, and IP literals come back whole as the registrable name.
    pub fn split(&self, netloc: &str) -> DomainParts {
        let host = lenient_host(netloc);
        trace!("Splitting host '{}' from '{}'", host, netloc);

        if host.is_empty() {
            return DomainParts::default();
        }
        if is_ip_literal(host) {
            debug!("Host {} is an IP literal", host);
            return DomainParts {
                domain: host.to_string(),
                ..DomainParts::default()
            };
        }

        let suffix_len = self.known_suffix_len(host);
        if suffix_len >= host.len() {
            // The whole host is a public suffix
            return DomainParts {
                suffix: host.to_string(),
                ..DomainParts::default()
            };
        }

        let (rest, suffix) = if suffix_len == 0 {
            (host, "")
        } else {
            (&host[..host.len() - suffix_len - 1], &host[host.len() - suffix_len..])
        };

        let (subdomain, domain) = match rest.rfind('.') {
            Some(idx) => (&rest[..idx], &rest[idx + 1..]),
            None => ("", rest),
        };

        DomainParts {
            subdomain: subdomain.to_string(),
            domain: domain.to_string(),
            suffix: suffix.to_string(),
        }
    }

    /// Byte length of the known public suffix of `host`, 0 when none matches
    fn known_suffix_len(&self, host: &str) -> usize {
        let lowered = host.to_ascii_lowercase();
        match self.list.suffix(lowered.as_bytes()) {
            Some(suffix) if suffix.is_known() => {
                let len = suffix.as_bytes().len();
                // Only trust a match that ends on a label boundary
                if len == host.len() || host.as_bytes().get(host.len() - len - 1) == Some(&b'.') {
                    len
                } else {
                    0
                }
            }
            _ => 0,
        }
    }
}

/// Reduces a network location to the bare host used for suffix matching
fn lenient_host(netloc: &str) -> &str {
    let after_userinfo = match netloc.rfind('@') {
        Some(idx) => &netloc[idx + 1..],
        None => netloc,
    };

    if after_userinfo.starts_with('[') {
        if let Some(end) = after_userinfo.find(']') {
            return &after_userinfo[..=end];
        }
    }

    let host = match after_userinfo.find(':') {
        Some(idx) => &after_userinfo[..idx],
        None => after_userinfo,
    };
    host.trim().trim_end_matches('.')
}

fn is_ip_literal(host: &str) -> bool {
    if host.starts_with('[') && host.ends_with(']') && host.len() >= 4 {
        return matches!(Host::parse(host), Ok(Host::Ipv6(_)));
    }
    STRICT_IPV4_REGEX.is_match(host)
}
