//! Results sink port trait.

use crate::domain::backtest::PnlSummary;
use crate::domain::error::AppError;
use crate::domain::position::Trade;
use crate::domain::strategy::Signal;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Port for persisting run results.
pub trait ResultsPort {
    fn log_trade_signals(&self, trade_log: &[Trade]) -> Result<(), AppError>;

    fn update_win_ratio(&self, trade_log: &[Trade]) -> Result<(), AppError>;

    fn update_summary_pnl(&self, summary: &BTreeMap<String, PnlSummary>) -> Result<(), AppError>;

    /// Default implementation: one-line alert text for a current signal.
    fn format_signal_alert(
        &self,
        symbol: &str,
        date: NaiveDate,
        signal: Signal,
        price: f64,
    ) -> String {
        format!("{signal} signal for {symbol} on {date} at {price:.2}")
    }
}
