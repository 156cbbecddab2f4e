use thiserror::Error;

/// Errors raised while turning a URL into a feature vector.
///
/// These are never recovered from inside the extractor. Callers at the
/// request boundary render them as a single generic failure message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    #[error("Invalid IPv6 URL: '{netloc}'")]
    MalformedUrl { netloc: String },

    #[error("division by zero while computing {field}")]
    DivisionByZero { field: &'static str },
}

pub type Result<T> = std::result::Result<T, FeatureError>;

/// Divides two counts, surfacing an empty denominator instead of defaulting.
pub(crate) fn checked_ratio(numerator: usize, denominator: usize, field: &'static str) -> Result<f64> {
    if denominator == 0 {
        return Err(FeatureError::DivisionByZero { field });
    }
    Ok(numerator as f64 / denominator as f64)
}
