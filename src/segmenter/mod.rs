//! Word segmentation and "naturalness" scoring for domain names.

pub mod corpus;
pub mod model;
pub mod scorer;

pub use corpus::{load_ranked_words, read_ranked_words, ReferenceWordSet};
pub use model::LanguageModel;
pub use scorer::{WordScore, WordScorer};
