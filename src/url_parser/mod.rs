pub mod netloc;
pub mod parser;
pub mod suffix;


pub use netloc::{extract_domain, is_https};
pub use parser::{first_subdomain, ParsedUrl};
pub use suffix::{DomainParts, SuffixList};
