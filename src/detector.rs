use anyhow::Result;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::DataConfig;
use crate::data_classifier::{Classifier, RandomForest, Verdict};
use crate::error::FeatureError;
use crate::features::{FeatureExtractor, FeatureVector};
use crate::segmenter::{load_ranked_words, LanguageModel, ReferenceWordSet, WordScorer};
use crate::url_parser::SuffixList;

/// Classification of one URL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub verdict: Verdict,
    pub confidence: f64,         // Probability of the predicted class
    pub features: FeatureVector, // Inputs the classifier saw
}

impl Assessment {
    /// Result line shown to the user
    pub fn message(&self) -> String {
        format!(
            "The URL is likely **{}**. Confidence: {:.2}",
            self.verdict, self.confidence
        )
    }
}

/// Rendered result of a request, after errors have been caught
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Assessment),
    Error(String),
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Success(assessment) => assessment.message(),
            Outcome::Error(message) => message.clone(),
        }
    }
}

/// Generic failure line shown for any processing error
pub fn error_message(err: &FeatureError) -> String {
    format!("Error processing the URL: {}", err)
}

/// Feature extractor paired with a trained classifier
///
/// Everything here is loaded once and read concurrently afterwards.
pub struct Detector {
    extractor: FeatureExtractor,
    classifier: Box<dyn Classifier>,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("extractor", &self.extractor)
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

impl Detector {
    pub fn new(extractor: FeatureExtractor, classifier: Box<dyn Classifier>) -> Self {
        Self { extractor, classifier }
    }

    /// Loads the corpus, word list, suffix list and model named in the config
    ///
    /// Without a dedicated word list, the corpus rows (most frequent first)
    /// double as the segmentation ranking. That ranking splits some domains
    /// differently from the trained word list, so it is logged as a warning.
    pub fn from_config(data: &DataConfig) -> Result<Self> {
        let ranked = load_ranked_words(&data.corpus_path)?;
        let model = match &data.wordlist_path {
            Some(path) => LanguageModel::load(path)?,
            None => {
                warn!(
                    "No word list configured, ranking segmentation words by the order of {}; \
                     RatioNLP may differ from the values the model was trained on",
                    data.corpus_path.display()
                );
                LanguageModel::from_ranked_words(&ranked)?
            }
        };
        let reference = ReferenceWordSet::from_words(&ranked);
        info!(
            "Loaded {} reference words from {}",
            reference.len(),
            data.corpus_path.display()
        );

        let suffixes = SuffixList::load(&data.suffix_list_path)?;
        let forest = RandomForest::load(&data.model_path)?;

        let extractor = FeatureExtractor::new(suffixes, WordScorer::new(model, reference));
        Ok(Self::new(extractor, Box::new(forest)))
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Extracts features without classifying
    pub fn features(&self, url: &str) -> std::result::Result<FeatureVector, FeatureError> {
        self.extractor.preprocess_url(url)
    }

    /// Classifies a URL, propagating any extraction error
    #[instrument(level = "debug", skip(self))]
    pub fn assess(&self, url: &str) -> std::result::Result<Assessment, FeatureError> {
        let features = self.extractor.preprocess_url(url)?;
        let input = features.to_array();
        let verdict = self.classifier.predict(&input);
        let proba = self.classifier.predict_proba(&input);
        let confidence = proba[usize::from(verdict.label())];

        info!("Classified {} as {} ({:.2})", url, verdict, confidence);
        Ok(Assessment { verdict, confidence, features })
    }

    /// Classifies a URL and turns any failure into a user-facing message
    pub fn render(&self, url: &str) -> Outcome {
        match self.assess(url) {
            Ok(assessment) => Outcome::Success(assessment),
            Err(e) => {
                warn!("Failed to process URL '{}': {}", url, e);
                Outcome::Error(error_message(&e))
            }
        }
    }
}
