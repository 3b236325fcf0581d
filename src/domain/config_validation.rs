//! Configuration validation.
//!
//! Each `validate_*` reads one group of keys, checks it and returns the typed
//! value. [`crate::domain::settings::Settings::from_config`] composes them.

use crate::domain::error::AppError;
use crate::domain::features::{Feature, Target};
use crate::domain::model::ModelKind;
use crate::domain::predictor::DEFAULT_VALIDATION_FRACTION;
use crate::domain::strategy::StrategyParams;
use crate::domain::universe::parse_symbols;
use crate::ports::config_port::ConfigPort;
use std::collections::BTreeSet;

pub const DEFAULT_MONTHS: i64 = 6;
pub const DEFAULT_INITIAL_CAPITAL: f64 = 100_000.0;

pub fn validate_months(config: &dyn ConfigPort) -> Result<u32, AppError> {
    let value = config.get_int("data", "months", DEFAULT_MONTHS);
    if value < 1 || value > i64::from(u32::MAX) {
        return Err(AppError::invalid("data", "months", "months must be at least 1"));
    }
    Ok(value as u32)
}

pub fn validate_symbols(config: &dyn ConfigPort) -> Result<BTreeSet<String>, AppError> {
    match config.get_string("backtest", "symbols") {
        Some(s) if !s.trim().is_empty() => {
            parse_symbols(&s).map_err(|e| AppError::invalid("backtest", "symbols", e.to_string()))
        }
        _ => Err(AppError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbols".to_string(),
        }),
    }
}

pub fn validate_initial_capital(config: &dyn ConfigPort) -> Result<f64, AppError> {
    let value = config.get_double("backtest", "initial_capital", DEFAULT_INITIAL_CAPITAL);
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::invalid(
            "backtest",
            "initial_capital",
            "initial_capital must be positive",
        ));
    }
    Ok(value)
}

fn validate_period(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, AppError> {
    let value = config.get_int("strategy", key, default as i64);
    if value < 1 {
        return Err(AppError::invalid(
            "strategy",
            key,
            format!("{key} must be at least 1"),
        ));
    }
    Ok(value as usize)
}

pub fn validate_strategy(config: &dyn ConfigPort) -> Result<StrategyParams, AppError> {
    let defaults = StrategyParams::default();
    let rsi_period = validate_period(config, "rsi_period", defaults.rsi_period)?;
    let short_ma_period = validate_period(config, "short_ma", defaults.short_ma_period)?;
    let long_ma_period = validate_period(config, "long_ma", defaults.long_ma_period)?;

    if short_ma_period >= long_ma_period {
        return Err(AppError::invalid(
            "strategy",
            "short_ma",
            "short_ma must be less than long_ma",
        ));
    }

    let rsi_overbought = config.get_double("strategy", "rsi_overbought", defaults.rsi_overbought);
    if rsi_overbought <= 0.0 || rsi_overbought >= 100.0 {
        return Err(AppError::invalid(
            "strategy",
            "rsi_overbought",
            "rsi_overbought must be between 0 and 100",
        ));
    }

    Ok(StrategyParams {
        rsi_period,
        short_ma_period,
        long_ma_period,
        rsi_overbought,
    })
}

pub fn validate_features(config: &dyn ConfigPort) -> Result<Vec<Feature>, AppError> {
    let raw = match config.get_string("ml", "features") {
        Some(s) => s,
        None => return Ok(Feature::ALL.to_vec()),
    };

    let mut features = Vec::new();
    for token in raw.split(',') {
        let feature: Feature = token
            .parse()
            .map_err(|e: String| AppError::invalid("ml", "features", e))?;
        if features.contains(&feature) {
            return Err(AppError::invalid(
                "ml",
                "features",
                format!("duplicate feature '{feature}'"),
            ));
        }
        features.push(feature);
    }
    Ok(features)
}

pub fn validate_target(config: &dyn ConfigPort) -> Result<Target, AppError> {
    match config.get_string("ml", "target") {
        Some(s) => s.parse().map_err(|e: String| AppError::invalid("ml", "target", e)),
        None => Ok(Target::Label),
    }
}

pub fn validate_model(config: &dyn ConfigPort) -> Result<ModelKind, AppError> {
    match config.get_string("ml", "model") {
        Some(s) => s.parse().map_err(|e: String| AppError::invalid("ml", "model", e)),
        None => Ok(ModelKind::DecisionTree),
    }
}

pub fn validate_validation_fraction(config: &dyn ConfigPort) -> Result<f64, AppError> {
    let value = config.get_double("ml", "validation_fraction", DEFAULT_VALIDATION_FRACTION);
    if !(0.0..0.9).contains(&value) {
        return Err(AppError::invalid(
            "ml",
            "validation_fraction",
            "validation_fraction must be in [0, 0.9)",
        ));
    }
    Ok(value)
}
