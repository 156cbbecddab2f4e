use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data_classifier::Verdict;
use crate::features::FeatureVector;

/// Request to classify a URL
#[derive(Debug, Deserialize, Clone)]
pub struct ClassifyRequest {
    /// URL to classify
    pub url: String,
}

/// Response for a classification request
#[derive(Debug, Serialize, Clone)]
pub struct ClassifyResponse {
    /// Always "success"
    pub status: String,

    /// URL from the request
    pub url: String,

    /// phishing or legitimate
    pub verdict: Verdict,

    /// Model class label, 0 phishing and 1 legitimate
    pub label: u8,

    /// Probability of the predicted class
    pub confidence: f64,

    /// Human-readable result line
    pub message: String,

    /// Features the classifier saw
    pub features: FeatureVector,
}

/// Standard error response format for the API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,  // "error" or "warning"
    pub message: String, // Detailed message
}

impl ErrorResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self { status: "error".to_string(), message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { status: "warning".to_string(), message: message.into() }
    }
}

/// Response for the health check endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub uptime_secs: i64,
    pub feature_columns: Vec<String>,
}
