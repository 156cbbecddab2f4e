use tracing::{debug, instrument, trace};

use crate::error::Result;
use super::netloc::extract_domain;
use super::suffix::{DomainParts, SuffixList};

/// Represents a URL broken down into the domain pieces used for scoring
///
/// All fields are derived from the network location exactly as it appears
/// in the input. Nothing is lowercased or normalized here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub original_url: String,    // The URL as provided
    pub domain: String,          // Network location (host plus optional port)
    pub first_subdomain: String, // Leftmost label, only when a subdomain is present
    pub parts: DomainParts,      // Suffix-aware split of the host
    pub core_domain: String,     // Subdomain and registrable name without www.
}

impl ParsedUrl {
    /// Parses a URL into its domain pieces
    ///
    /// This function performs the following steps:
    /// 1. Extracts the network location
    /// 2. Picks the first subdomain label when the location has more than two labels
    /// 3. Splits the host against the public suffix list to find the core domain
    ///
    /// # Arguments
    /// * `url` - The URL to parse
    /// * `suffixes` - Public suffix list used for the registrable-name split
    ///
    /// # Returns
    /// * `Result<ParsedUrl>` - The parsed pieces, or `MalformedUrl`
    #[instrument(level = "debug", skip_all, fields(url = %url))]
    pub fn new(url: &str, suffixes: &SuffixList) -> Result<Self> {
        trace!("Starting URL parsing");

        let domain = extract_domain(url)?;
        let first_subdomain = first_subdomain(&domain);
        let parts = suffixes.split(&domain);
        let core_domain = parts.core_domain();

        debug!(
            "Parsed domain='{}' first_subdomain='{}' core_domain='{}'",
            domain, first_subdomain, core_domain
        );

        Ok(ParsedUrl {
            original_url: url.to_string(),
            domain,
            first_subdomain,
            parts,
            core_domain,
        })
    }
}

/// Leftmost label of the domain when it has more than two labels, else empty
pub fn first_subdomain(domain: &str) -> String {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() > 2 {
        labels[0].to_string()
    } else {
        String::new()
    }
}
