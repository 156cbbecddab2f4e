//! Phishing URL classification from lexical domain features.
//!
//! A URL is reduced to twelve features (subdomain shape, character classes,
//! IP literal, HTTPS, and how word-like the domain is) which feed a trained
//! tree ensemble.

pub mod api;
pub mod config;
pub mod data_classifier;
pub mod detector;
pub mod error;
pub mod features;
pub mod segmenter;
pub mod url_parser;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use detector::{Assessment, Detector, Outcome};
pub use error::FeatureError;
pub use features::{FeatureExtractor, FeatureVector, FEATURE_COLUMNS};
