//! Binary classifiers for next-bar direction.
//!
//! Two interchangeable implementations of [`BinaryClassifier`] are available;
//! [`ModelKind`] picks one once, when a predictor is constructed.

pub mod decision_tree;
pub mod logistic;

pub use decision_tree::{DecisionTree, TreeConfig};
pub use logistic::LogisticRegression;

use std::fmt;
use std::str::FromStr;

/// Fit on feature rows and labels in `{0, 1}`, predict a class for one row.
pub trait BinaryClassifier {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]);
    fn predict(&self, x: &[f64]) -> u8;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    DecisionTree,
    LogisticRegression,
}

impl ModelKind {
    pub fn build(self) -> Classifier {
        match self {
            ModelKind::DecisionTree => Classifier::DecisionTree(DecisionTree::default()),
            ModelKind::LogisticRegression => {
                Classifier::LogisticRegression(LogisticRegression::default())
            }
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::DecisionTree => write!(f, "decision_tree"),
            ModelKind::LogisticRegression => write!(f, "logistic_regression"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "decision_tree" => Ok(ModelKind::DecisionTree),
            "logistic_regression" => Ok(ModelKind::LogisticRegression),
            other => Err(format!(
                "unknown model '{}' (expected decision_tree or logistic_regression)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Classifier {
    DecisionTree(DecisionTree),
    LogisticRegression(LogisticRegression),
}

impl BinaryClassifier for Classifier {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) {
        match self {
            Classifier::DecisionTree(m) => m.fit(x, y),
            Classifier::LogisticRegression(m) => m.fit(x, y),
        }
    }

    fn predict(&self, x: &[f64]) -> u8 {
        match self {
            Classifier::DecisionTree(m) => m.predict(x),
            Classifier::LogisticRegression(m) => m.predict(x),
        }
    }
}

/// Fraction of rows whose prediction matches the label.
pub fn accuracy(model: &impl BinaryClassifier, x: &[Vec<f64>], y: &[u8]) -> Option<f64> {
    if x.is_empty() {
        return None;
    }
    let correct = x
        .iter()
        .zip(y)
        .filter(|(row, label)| model.predict(row) == **label)
        .count();
    Some(correct as f64 / x.len() as f64)
}
