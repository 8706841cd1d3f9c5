//! Decision forest classifier artifact
//!
//! The trained crop model is exported as a JSON decision forest. Each tree is
//! a node arena whose root is node 0; a sample goes left at a split when
//! `x[feature] <= threshold`. The forest answer is the argmax of the averaged,
//! normalised leaf distributions.

use std::io::Read;

use serde::Deserialize;
use shared::{Classifier, PredictionError, PredictionRequest, FEATURE_ORDER};

/// Export format version this server understands
pub const FORMAT_VERSION: u32 = 1;

/// Errors found while parsing or checking a forest export
#[derive(Debug, thiserror::Error)]
pub enum ForestError {
    #[error("malformed forest JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported forest format version {found}, expected {expected}")]
    UnsupportedVersion { expected: u32, found: u32 },

    #[error("forest was trained on features {found:?}, expected {expected:?}")]
    FeatureSchema {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("forest has no trees")]
    NoTrees,

    #[error("forest declares zero classes")]
    NoClasses,

    #[error("tree {tree} has no nodes")]
    EmptyTree { tree: usize },

    #[error("tree {tree} node {node} splits on feature {feature}, but only {n_features} features exist")]
    FeatureOutOfRange {
        tree: usize,
        node: usize,
        feature: usize,
        n_features: usize,
    },

    #[error("tree {tree} node {node} points to child {child}, which is not a later node in the arena")]
    BadChild { tree: usize, node: usize, child: usize },

    #[error("tree {tree} leaf {node} has {got} class weights, expected {expected}")]
    DistributionLength {
        tree: usize,
        node: usize,
        expected: usize,
        got: usize,
    },

    #[error("tree {tree} leaf {node} has no positive class weight")]
    EmptyDistribution { tree: usize, node: usize },
}

/// One node of a tree arena
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Class weights, e.g. sample counts per class at this leaf
        distribution: Vec<f64>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root to a leaf and return its normalised distribution
    fn leaf_for(&self, sample: &[f64; 7]) -> Vec<f64> {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { distribution } => {
                    let total: f64 = distribution.iter().sum();
                    return distribution.iter().map(|w| w / total).collect();
                }
            }
        }
    }
}

/// Loaded and checked decision forest
#[derive(Debug, Clone, Deserialize)]
pub struct ForestClassifier {
    format_version: u32,
    feature_names: Vec<String>,
    n_classes: usize,
    trees: Vec<Tree>,
}

impl ForestClassifier {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ForestError> {
        let forest: ForestClassifier = serde_json::from_reader(reader)?;
        forest.check()?;
        Ok(forest)
    }

    #[cfg(test)]
    pub fn from_json(json: &str) -> Result<Self, ForestError> {
        Self::from_reader(json.as_bytes())
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Averaged class distribution for a sample
    pub fn predict_proba(&self, sample: &[f64; 7]) -> Vec<f64> {
        let mut avg = vec![0.0f64; self.n_classes];
        for tree in &self.trees {
            for (i, p) in tree.leaf_for(sample).iter().enumerate() {
                avg[i] += p;
            }
        }
        let n = self.trees.len() as f64;
        avg.iter_mut().for_each(|v| *v /= n);
        avg
    }

    /// Structural checks that make prediction total: every walk ends at a leaf
    /// because children always sit later in the arena.
    fn check(&self) -> Result<(), ForestError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ForestError::UnsupportedVersion {
                expected: FORMAT_VERSION,
                found: self.format_version,
            });
        }

        if self.feature_names.iter().map(String::as_str).ne(FEATURE_ORDER) {
            return Err(ForestError::FeatureSchema {
                expected: FEATURE_ORDER.iter().map(|s| s.to_string()).collect(),
                found: self.feature_names.clone(),
            });
        }

        if self.n_classes == 0 {
            return Err(ForestError::NoClasses);
        }

        if self.trees.is_empty() {
            return Err(ForestError::NoTrees);
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ForestError::EmptyTree { tree: t });
            }

            for (n, node) in tree.nodes.iter().enumerate() {
                match node {
                    Node::Split {
                        feature,
                        left,
                        right,
                        ..
                    } => {
                        if *feature >= FEATURE_ORDER.len() {
                            return Err(ForestError::FeatureOutOfRange {
                                tree: t,
                                node: n,
                                feature: *feature,
                                n_features: FEATURE_ORDER.len(),
                            });
                        }
                        for child in [*left, *right] {
                            if child <= n || child >= tree.nodes.len() {
                                return Err(ForestError::BadChild {
                                    tree: t,
                                    node: n,
                                    child,
                                });
                            }
                        }
                    }
                    Node::Leaf { distribution } => {
                        if distribution.len() != self.n_classes {
                            return Err(ForestError::DistributionLength {
                                tree: t,
                                node: n,
                                expected: self.n_classes,
                                got: distribution.len(),
                            });
                        }
                        let total: f64 = distribution.iter().sum();
                        if distribution.iter().any(|w| !w.is_finite() || *w < 0.0) || total <= 0.0 {
                            return Err(ForestError::EmptyDistribution { tree: t, node: n });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

impl Classifier for ForestClassifier {
    fn predict(&self, request: &PredictionRequest) -> Result<usize, PredictionError> {
        let sample = request.features();
        if sample.iter().any(|v| !v.is_finite()) {
            return Err(PredictionError::Classifier(
                "record contains a non-finite value".to_string(),
            ));
        }

        // Lowest class index wins on ties.
        let proba = self.predict_proba(&sample);
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        Ok(best)
    }

    fn n_classes(&self) -> Option<usize> {
        Some(self.n_classes)
    }
}
