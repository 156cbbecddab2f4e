pub mod forest;

use serde::Serialize;

use crate::features::FEATURE_COUNT;

pub use forest::RandomForest;

/// Class predicted for a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Phishing,
    Legitimate,
}

impl Verdict {
    /// Class label as used by the model: 0 phishing, 1 legitimate
    pub fn label(self) -> u8 {
        match self {
            Verdict::Phishing => 0,
            Verdict::Legitimate => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Phishing => "phishing",
            Verdict::Legitimate => "legitimate",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary URL classifier over the fixed feature columns
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Most probable class
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Verdict;

    /// `[p(phishing), p(legitimate)]`, summing to 1
    fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> [f64; 2];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::Phishing.label(), 0);
        assert_eq!(Verdict::Legitimate.label(), 1);
    }

    #[test]
    fn test_verdict_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Verdict::Phishing).unwrap(), "\"phishing\"");
        assert_eq!(Verdict::Legitimate.to_string(), "legitimate");
    }
}
