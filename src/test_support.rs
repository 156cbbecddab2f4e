//! Fixture-backed builders shared by the unit tests.

use crate::data_classifier::RandomForest;
use crate::detector::Detector;
use crate::features::FeatureExtractor;
use crate::segmenter::{read_ranked_words, LanguageModel, ReferenceWordSet, WordScorer};
use crate::url_parser::SuffixList;

pub const SUFFIX_LIST: &str = include_str!("../tests/fixtures/public_suffix_list.dat");
pub const WORDS: &str = include_str!("../tests/fixtures/words.txt");
pub const CORPUS: &str = include_str!("../tests/fixtures/unigram_freq.csv");
pub const MODEL: &str = include_str!("../tests/fixtures/model.json");

pub fn suffix_list() -> SuffixList {
    SuffixList::from_text(SUFFIX_LIST).unwrap()
}

pub fn scorer() -> WordScorer {
    let model = LanguageModel::from_ranked_words(WORDS.split_whitespace()).unwrap();
    let reference = ReferenceWordSet::from_words(read_ranked_words(CORPUS.as_bytes()).unwrap());
    WordScorer::new(model, reference)
}

pub fn extractor() -> FeatureExtractor {
    FeatureExtractor::new(suffix_list(), scorer())
}

pub fn forest() -> RandomForest {
    RandomForest::from_json(MODEL).unwrap()
}

pub fn detector() -> Detector {
    Detector::new(extractor(), Box::new(forest()))
}
