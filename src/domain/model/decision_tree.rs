//! CART decision tree classifier (Gini impurity, midpoint thresholds).

use super::BinaryClassifier;

#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            max_depth: 5,
            min_samples_split: 10,
            min_samples_leaf: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        class: u8,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<Node>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    left: Vec<usize>,
    right: Vec<usize>,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        DecisionTree { config, root: None }
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    fn build(&self, x: &[Vec<f64>], y: &[u8], indices: &[usize], depth: usize) -> Node {
        let ones = indices.iter().filter(|&&i| y[i] == 1).count();
        let class = u8::from(ones * 2 > indices.len());
        let impurity = gini(ones, indices.len());

        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || impurity < 1e-12
        {
            return Node::Leaf { class };
        }

        match self.best_split(x, y, indices, impurity) {
            Some(split) => Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left: Box::new(self.build(x, y, &split.left, depth + 1)),
                right: Box::new(self.build(x, y, &split.right, depth + 1)),
            },
            None => Node::Leaf { class },
        }
    }

    fn best_split(
        &self,
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        parent_impurity: f64,
    ) -> Option<SplitCandidate> {
        let n = indices.len() as f64;
        let n_features = x.get(indices[0]).map_or(0, Vec::len);
        let mut best_gain = 0.0;
        let mut best: Option<SplitCandidate> = None;

        for feature in 0..n_features {
            let mut values: Vec<f64> = indices.iter().map(|&i| x[i][feature]).collect();
            values.sort_by(f64::total_cmp);
            values.dedup();

            for pair in values.windows(2) {
                let threshold = (pair[0] + pair[1]) / 2.0;
                let (left, right): (Vec<usize>, Vec<usize>) =
                    indices.iter().partition(|&&i| x[i][feature] <= threshold);

                if left.len() < self.config.min_samples_leaf
                    || right.len() < self.config.min_samples_leaf
                {
                    continue;
                }

                let left_ones = left.iter().filter(|&&i| y[i] == 1).count();
                let right_ones = right.iter().filter(|&&i| y[i] == 1).count();
                let weighted = (left.len() as f64 / n) * gini(left_ones, left.len())
                    + (right.len() as f64 / n) * gini(right_ones, right.len());
                let gain = parent_impurity - weighted;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        left,
                        right,
                    });
                }
            }
        }

        best
    }
}

impl BinaryClassifier for DecisionTree {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) {
        if x.is_empty() || x.len() != y.len() {
            self.root = None;
            return;
        }
        let indices: Vec<usize> = (0..x.len()).collect();
        self.root = Some(self.build(x, y, &indices, 0));
    }

    fn predict(&self, x: &[f64]) -> u8 {
        let mut node = match &self.root {
            Some(root) => root,
            None => return 0,
        };
        loop {
            match node {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = x.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { &**left } else { &**right };
                }
            }
        }
    }
}

fn gini(ones: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = ones as f64 / total as f64;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}
