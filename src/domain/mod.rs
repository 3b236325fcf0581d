//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod strategy;
pub mod position;
pub mod portfolio;
pub mod backtest;
pub mod metrics;
pub mod features;
pub mod model;
pub mod predictor;
pub mod universe;
pub mod config_validation;
pub mod settings;
pub mod orchestrator;
pub mod error;
