use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use super::{Classifier, Verdict};
use crate::features::{FEATURE_COLUMNS, FEATURE_COUNT};

/// One node of a decision tree
///
/// Samples go left when `features[feature] <= threshold`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: [f64; 2],
    },
}

#[derive(Debug, Clone, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    // Children always sit after their parent, so the walk terminates
    fn leaf_distribution(&self, features: &[f64; FEATURE_COUNT]) -> [f64; 2] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split { feature, threshold, left, right } => {
                    idx = if features[*feature] <= *threshold { *left } else { *right };
                }
                Node::Leaf { value } => {
                    let total = value[0] + value[1];
                    return [value[0] / total, value[1] / total];
                }
            }
        }
    }

    fn validate(&self, tree_idx: usize) -> Result<()> {
        ensure!(!self.nodes.is_empty(), "tree {} has no nodes", tree_idx);
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split { feature, left, right, .. } => {
                    ensure!(
                        *feature < FEATURE_COUNT,
                        "tree {} node {} splits on unknown feature {}",
                        tree_idx, idx, feature
                    );
                    for child in [*left, *right] {
                        ensure!(
                            child > idx && child < self.nodes.len(),
                            "tree {} node {} has invalid child {}",
                            tree_idx, idx, child
                        );
                    }
                }
                Node::Leaf { value } => {
                    ensure!(
                        value.iter().all(|v| v.is_finite() && *v >= 0.0) && value[0] + value[1] > 0.0,
                        "tree {} leaf {} has an invalid class distribution",
                        tree_idx, idx
                    );
                }
            }
        }
        Ok(())
    }
}

/// Averaging ensemble of decision trees, exported from a trained forest
///
/// Only built through [`RandomForest::from_json`] or [`RandomForest::load`],
/// which validate every tree before it can be evaluated.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    trees: Vec<Tree>,
}

impl RandomForest {
    pub fn from_json(json: &str) -> Result<Self> {
        let forest: RandomForest = serde_json::from_str(json).context("Failed to decode model JSON")?;
        forest.validate()?;
        debug!("Decoded forest with {} trees", forest.trees.len());
        Ok(forest)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model {}", path.display()))?;
        let forest = Self::from_json(&json)
            .with_context(|| format!("Incompatible model artifact {}", path.display()))?;
        info!("Loaded model from {} ({} trees)", path.display(), forest.trees.len());
        Ok(forest)
    }

    fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            bail!("model has no trees");
        }
        if let Some(names) = &self.feature_names {
            ensure!(
                names.iter().map(String::as_str).eq(FEATURE_COLUMNS),
                "model feature columns {:?} do not match {:?}",
                names, FEATURE_COLUMNS
            );
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(idx)?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn name(&self) -> &str {
        "random-forest"
    }

    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Verdict {
        let [phishing, legitimate] = self.predict_proba(features);
        if legitimate > phishing {
            Verdict::Legitimate
        } else {
            Verdict::Phishing
        }
    }

    fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> [f64; 2] {
        let mut sum = [0.0; 2];
        for tree in &self.trees {
            let dist = tree.leaf_distribution(features);
            sum[0] += dist[0];
            sum[1] += dist[1];
        }
        let n = self.trees.len() as f64;
        [sum[0] / n, sum[1] / n]
    }
}
