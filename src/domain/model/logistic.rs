//! Logistic regression for binary classification.
//!
//! Inputs are standardised with the training mean and standard deviation, then
//! weights are fitted by batch gradient descent on the log loss.

use super::BinaryClassifier;
use ndarray::{Array1, Array2, Axis};

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    learning_rate: f64,
    max_iter: usize,
    l2: f64,
    weights: Option<Array1<f64>>,
    bias: f64,
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(0.1, 500, 0.0)
    }
}

impl LogisticRegression {
    pub fn new(learning_rate: f64, max_iter: usize, l2: f64) -> Self {
        Self {
            learning_rate,
            max_iter,
            l2,
            weights: None,
            bias: 0.0,
            mean: Array1::zeros(0),
            scale: Array1::zeros(0),
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }

    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, x: &[f64]) -> Option<f64> {
        let weights = self.weights.as_ref()?;
        if x.len() != weights.len() {
            return None;
        }
        let row = (Array1::from_vec(x.to_vec()) - &self.mean) / &self.scale;
        Some(Self::sigmoid(row.dot(weights) + self.bias))
    }
}

impl BinaryClassifier for LogisticRegression {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) {
        self.weights = None;
        let n_samples = x.len();
        if n_samples == 0 || n_samples != y.len() {
            return;
        }
        let n_features = x[0].len();
        if x.iter().any(|row| row.len() != n_features) {
            return;
        }

        let raw = Array2::from_shape_fn((n_samples, n_features), |(i, j)| x[i][j]);
        let mean = raw.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(n_features));
        let scale = raw
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 1e-12 { s } else { 1.0 });
        let features = (&raw - &mean) / &scale;
        let labels = Array1::from_iter(y.iter().map(|&v| f64::from(v)));

        let mut weights = Array1::<f64>::zeros(n_features);
        let mut bias = 0.0;
        let n = n_samples as f64;

        for _ in 0..self.max_iter {
            let linear = features.dot(&weights) + bias;
            let predictions = linear.mapv(Self::sigmoid);
            let errors = &predictions - &labels;

            let dw = features.t().dot(&errors) / n + &weights * self.l2;
            let db = errors.sum() / n;

            weights = &weights - &(dw * self.learning_rate);
            bias -= self.learning_rate * db;
        }

        self.weights = Some(weights);
        self.bias = bias;
        self.mean = mean;
        self.scale = scale;
    }

    fn predict(&self, x: &[f64]) -> u8 {
        match self.predict_proba(x) {
            Some(p) if p >= 0.5 => 1,
            _ => 0,
        }
    }
}
