use serde::Serialize;

pub const FEATURE_COUNT: usize = 12;

/// Column order the classifier was trained with
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "DigitsFirstSubdomain",
    "LengthFirstSubdomain",
    "IsDomainIP",
    "NoOfDigitsInDomain",
    "DigitRatioInDomain",
    "NoOfHyphenInDomain",
    "NoOfOtherSpecialInDomain",
    "SpecialCharRatioInDomain",
    "CharContinuationRate",
    "IsHTTPS",
    "RatioNLP",
    "CommonWords",
];

/// Lexical and structural features of one URL
///
/// Fields are declared in classifier column order, so the serialized form
/// and `to_array` agree with `FEATURE_COLUMNS`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    #[serde(rename = "DigitsFirstSubdomain")]
    pub digits_first_subdomain: usize,
    #[serde(rename = "LengthFirstSubdomain")]
    pub length_first_subdomain: usize,
    #[serde(rename = "IsDomainIP")]
    pub is_domain_ip: u8,
    #[serde(rename = "NoOfDigitsInDomain")]
    pub digits_in_domain: usize,
    #[serde(rename = "DigitRatioInDomain")]
    pub digit_ratio_in_domain: f64,
    #[serde(rename = "NoOfHyphenInDomain")]
    pub hyphens_in_domain: usize,
    #[serde(rename = "NoOfOtherSpecialInDomain")]
    pub other_special_in_domain: usize,
    #[serde(rename = "SpecialCharRatioInDomain")]
    pub special_char_ratio_in_domain: f64,
    #[serde(rename = "CharContinuationRate")]
    pub char_continuation_rate: f64,
    #[serde(rename = "IsHTTPS")]
    pub is_https: u8,
    #[serde(rename = "RatioNLP")]
    pub ratio_nlp: f64,
    #[serde(rename = "CommonWords")]
    pub common_words: usize,
}

impl FeatureVector {
    /// Values in `FEATURE_COLUMNS` order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.digits_first_subdomain as f64,
            self.length_first_subdomain as f64,
            f64::from(self.is_domain_ip),
            self.digits_in_domain as f64,
            self.digit_ratio_in_domain,
            self.hyphens_in_domain as f64,
            self.other_special_in_domain as f64,
            self.special_char_ratio_in_domain,
            self.char_continuation_rate,
            f64::from(self.is_https),
            self.ratio_nlp,
            self.common_words as f64,
        ]
    }
}
