//! Per-symbol next-bar direction predictor.
//!
//! A predictor starts untrained, is trained once from a prepared feature table
//! and is then only queried. Predictions have three outcomes: up, down, or
//! unavailable. The numeric codes `1 / 0 / -1` are kept for reporting.

use crate::domain::features::{derive_features, Feature, FeatureRow, Target};
use crate::domain::model::{accuracy, BinaryClassifier, Classifier, ModelKind};
use crate::domain::ohlcv::Bar;
use std::fmt;

pub const DEFAULT_VALIDATION_FRACTION: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Up,
    Down,
    Unavailable,
}

impl Prediction {
    pub fn code(self) -> i8 {
        match self {
            Prediction::Up => 1,
            Prediction::Down => 0,
            Prediction::Unavailable => -1,
        }
    }

    pub fn is_available(self) -> bool {
        self != Prediction::Unavailable
    }

    fn from_class(class: u8) -> Self {
        if class == 1 {
            Prediction::Up
        } else {
            Prediction::Down
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Up => write!(f, "Up/Unchanged"),
            Prediction::Down => write!(f, "Down"),
            Prediction::Unavailable => write!(f, "N/A - Prediction Unavailable"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub classifier: Classifier,
    pub features: Vec<Feature>,
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone)]
pub enum Model {
    Untrained,
    Trained(TrainedModel),
}

impl Model {
    pub fn is_trained(&self) -> bool {
        matches!(self, Model::Trained(_))
    }
}

#[derive(Debug, Clone)]
pub struct MlPredictor {
    kind: ModelKind,
    rsi_period: usize,
    validation_fraction: f64,
    model: Model,
}

impl MlPredictor {
    pub fn new(kind: ModelKind, rsi_period: usize, validation_fraction: f64) -> Self {
        MlPredictor {
            kind,
            rsi_period,
            validation_fraction: validation_fraction.clamp(0.0, 0.9),
            model: Model::Untrained,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_trained()
    }

    /// Fit on the leading rows and score on the trailing validation rows.
    ///
    /// Returns the validation accuracy (`None` when there are no validation
    /// rows) and the fitted model. Rows lacking a feature or the target are
    /// skipped; with nothing left the model stays untrained.
    pub fn train_model(
        &mut self,
        rows: &[FeatureRow],
        features: &[Feature],
        target: Target,
    ) -> (Option<f64>, &Model) {
        let (x, y): (Vec<Vec<f64>>, Vec<u8>) = rows
            .iter()
            .filter_map(|row| Some((row.vector(features)?, row.target(target)?)))
            .unzip();

        let train_len = ((1.0 - self.validation_fraction) * x.len() as f64).round() as usize;
        let train_len = train_len.min(x.len());
        if train_len == 0 || features.is_empty() {
            self.model = Model::Untrained;
            return (None, &self.model);
        }

        let mut classifier = self.kind.build();
        classifier.fit(&x[..train_len], &y[..train_len]);
        let score = accuracy(&classifier, &x[train_len..], &y[train_len..]);

        self.model = Model::Trained(TrainedModel {
            classifier,
            features: features.to_vec(),
            accuracy: score,
        });
        (score, &self.model)
    }

    /// Predict the direction of the bar after the last one in `recent_bars`.
    pub fn predict_next_day_movement(&self, recent_bars: &[Bar], features: &[Feature]) -> Prediction {
        let trained = match &self.model {
            Model::Trained(t) => t,
            Model::Untrained => return Prediction::Unavailable,
        };
        if features != trained.features.as_slice() {
            return Prediction::Unavailable;
        }

        let rows = derive_features(recent_bars, self.rsi_period);
        match rows.last().and_then(|row| row.vector(features)) {
            Some(x) => Prediction::from_class(trained.classifier.predict(&x)),
            None => Prediction::Unavailable,
        }
    }
}
