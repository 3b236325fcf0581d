//! algotrader: moving-average/RSI signal generation, long-only backtesting
//! and next-day direction prediction over daily bars.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
