//! Backtest engine: replays a signal sequence against a single-position,
//! long-only account.
//!
//! FLAT --BUY--> LONG (all cash, fractional quantity at the close)
//! LONG --SELL--> FLAT (close at the bar's close, record the trade)
//! HOLD and undefined signals never transition.

use super::portfolio::{max_drawdown, Account};
use super::position::Trade;
use super::strategy::{Signal, SignalBar};

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub symbol: String,
    pub initial_capital: f64,
    /// Cash plus the open position marked at the final close.
    pub final_capital: f64,
    /// Realized plus unrealized; always `final_capital - initial_capital`.
    pub total_pnl: f64,
    /// PnL of a position still open at the end of data, zero when flat.
    pub unrealized_pnl: f64,
    pub max_drawdown: f64,
    pub trade_log: Vec<Trade>,
}

impl BacktestResult {
    pub fn realized_pnl(&self) -> f64 {
        self.trade_log.iter().map(|t| t.realized_pnl).sum()
    }

    pub fn summary(&self) -> PnlSummary {
        PnlSummary {
            initial_capital: self.initial_capital,
            final_capital: self.final_capital,
            total_pnl: self.total_pnl,
            max_drawdown: self.max_drawdown,
        }
    }
}

/// Per-symbol figures handed to the results sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PnlSummary {
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_pnl: f64,
    /// Fraction of peak equity, 0.0 to 1.0.
    pub max_drawdown: f64,
}

/// Returns `None` when there are no bars or no bar ever carries a signal.
pub fn run_backtest(
    symbol: &str,
    bars: &[SignalBar],
    initial_capital: f64,
) -> Option<BacktestResult> {
    let last = bars.last()?;
    if bars.iter().all(|b| b.signal.is_none()) {
        return None;
    }

    let mut account = Account::new(symbol, initial_capital);

    for sb in bars {
        let (date, close) = (sb.bar.date, sb.bar.close);
        match sb.signal {
            Some(Signal::Buy) if account.is_flat() => {
                account.open_long(date, close);
            }
            Some(Signal::Sell) if !account.is_flat() => {
                account.close_long(date, close);
            }
            _ => {}
        }
        account.record_equity(date, close);
    }

    let last_close = last.bar.close;
    let unrealized_pnl = account.unrealized_pnl(last_close);
    let realized_pnl = account.realized_pnl();
    let total_pnl = realized_pnl + unrealized_pnl;

    Some(BacktestResult {
        symbol: symbol.to_string(),
        initial_capital,
        final_capital: initial_capital + total_pnl,
        total_pnl,
        unrealized_pnl,
        max_drawdown: max_drawdown(&account.equity_curve),
        trade_log: account.trades,
    })
}
