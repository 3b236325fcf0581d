//! Run settings assembled from configuration.

use crate::domain::config_validation::{
    validate_features, validate_initial_capital, validate_model, validate_months,
    validate_strategy, validate_symbols, validate_target, validate_validation_fraction,
};
use crate::domain::error::AppError;
use crate::domain::features::{Feature, Target};
use crate::domain::model::ModelKind;
use crate::domain::strategy::StrategyParams;
use crate::ports::config_port::ConfigPort;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Immutable settings for one run. Built once and passed by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub symbols: BTreeSet<String>,
    pub months: u32,
    pub initial_capital: f64,
    pub strategy: StrategyParams,
    pub features: Vec<Feature>,
    pub target: Target,
    pub model: ModelKind,
    pub validation_fraction: f64,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub alerts_enabled: bool,
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, AppError> {
        Ok(Settings {
            symbols: validate_symbols(config)?,
            months: validate_months(config)?,
            initial_capital: validate_initial_capital(config)?,
            strategy: validate_strategy(config)?,
            features: validate_features(config)?,
            target: validate_target(config)?,
            model: validate_model(config)?,
            validation_fraction: validate_validation_fraction(config)?,
            data_dir: config
                .get_string("data", "dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            output_dir: config
                .get_string("output", "dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("output")),
            alerts_enabled: config.get_bool("alerts", "enabled", true),
        })
    }
}
