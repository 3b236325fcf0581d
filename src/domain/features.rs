//! Feature table for the next-bar direction classifier.
//!
//! Each row carries RSI, the three MACD components and a volume ratio for one
//! bar, plus a label derived from the following bar's close. Fields stay
//! `None` until their indicator has warmed up; the final bar has no label.

use crate::domain::indicator::{calculate_macd_default, calculate_rsi};
use crate::domain::indicator::macd::DEFAULT_SLOW;
use crate::domain::indicator::sma::sma_values;
use crate::domain::ohlcv::Bar;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Fewest complete rows worth training on.
pub const MIN_TRAINING_ROWS: usize = 30;

/// Lookback for the volume ratio denominator.
pub const VOLUME_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Rsi,
    Macd,
    MacdSignal,
    MacdHist,
    VolumeNorm,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Rsi,
        Feature::Macd,
        Feature::MacdSignal,
        Feature::MacdHist,
        Feature::VolumeNorm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Rsi => "rsi",
            Feature::Macd => "macd",
            Feature::MacdSignal => "macd_signal",
            Feature::MacdHist => "macd_hist",
            Feature::VolumeNorm => "volume_norm",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| format!("unknown feature '{}'", s.trim()))
    }
}

/// Prediction target. The only target is the next-bar direction label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Label,
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "label" | "target" => Ok(Target::Label),
            other => Err(format!("unknown target '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub close: f64,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub volume_norm: Option<f64>,
    /// 1 when the next close is at or above this close, 0 when below.
    pub label: Option<u8>,
}

impl FeatureRow {
    pub fn feature(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Rsi => self.rsi,
            Feature::Macd => self.macd,
            Feature::MacdSignal => self.macd_signal,
            Feature::MacdHist => self.macd_hist,
            Feature::VolumeNorm => self.volume_norm,
        }
    }

    pub fn target(&self, target: Target) -> Option<u8> {
        match target {
            Target::Label => self.label,
        }
    }

    /// Values for `features` in order, `None` if any is undefined.
    pub fn vector(&self, features: &[Feature]) -> Option<Vec<f64>> {
        features.iter().map(|f| self.feature(*f)).collect()
    }

    fn is_complete(&self) -> bool {
        Feature::ALL.iter().all(|f| self.feature(*f).is_some()) && self.label.is_some()
    }
}

/// One row per bar, warm-up fields left undefined.
pub fn derive_features(bars: &[Bar], rsi_period: usize) -> Vec<FeatureRow> {
    let rsi = calculate_rsi(bars, rsi_period);
    let macd = calculate_macd_default(bars);
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
    let volume_mean = sma_values(&volumes, VOLUME_WINDOW);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let m = macd.get(i);
            FeatureRow {
                date: bar.date,
                close: bar.close,
                rsi: rsi.get(i),
                macd: m.map(|v| v.line),
                macd_signal: m.map(|v| v.signal),
                macd_hist: m.map(|v| v.histogram),
                volume_norm: volume_mean[i]
                    .filter(|mean| *mean > 0.0)
                    .map(|mean| volumes[i] / mean),
                label: bars
                    .get(i + 1)
                    .map(|next| u8::from(next.close >= bar.close)),
            }
        })
        .collect()
}

/// Complete, labelled rows ready for training.
///
/// Returns an empty table when fewer than [`MIN_TRAINING_ROWS`] survive.
pub fn prepare_data_for_ml(bars: &[Bar], rsi_period: usize) -> Vec<FeatureRow> {
    let rows: Vec<FeatureRow> = derive_features(bars, rsi_period)
        .into_iter()
        .filter(FeatureRow::is_complete)
        .collect();

    if rows.len() < MIN_TRAINING_ROWS {
        return Vec::new();
    }
    rows
}

/// Trailing bars needed for every feature to be defined on the latest bar.
pub fn prediction_window(rsi_period: usize) -> usize {
    rsi_period.max(DEFAULT_SLOW) + 2
}
