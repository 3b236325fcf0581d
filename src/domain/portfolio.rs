//! Single-symbol, single-position simulated account.

use chrono::NaiveDate;

use super::position::{Position, Trade};

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Cash plus at most one open long position.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub symbol: String,
    pub initial_capital: f64,
    pub cash: f64,
    pub position: Option<Position>,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

impl Account {
    pub fn new(symbol: &str, initial_capital: f64) -> Self {
        Account {
            symbol: symbol.to_string(),
            initial_capital,
            cash: initial_capital,
            position: None,
            trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    pub fn is_flat(&self) -> bool {
        self.position.is_none()
    }

    /// Put all cash into a long position at `price`. Returns false when
    /// already long or the price cannot size a position.
    pub fn open_long(&mut self, date: NaiveDate, price: f64) -> bool {
        if self.position.is_some() || price <= 0.0 || self.cash <= 0.0 {
            return false;
        }
        let quantity = self.cash / price;
        self.position = Some(Position {
            entry_date: date,
            entry_price: price,
            quantity,
        });
        self.cash = 0.0;
        true
    }

    /// Close the open position at `price`, crediting cash with the proceeds.
    pub fn close_long(&mut self, date: NaiveDate, price: f64) -> Option<&Trade> {
        let position = self.position.take()?;
        self.cash += position.market_value(price);
        self.trades.push(position.close(&self.symbol, date, price));
        self.trades.last()
    }

    pub fn equity(&self, price: f64) -> f64 {
        self.cash
            + self
                .position
                .as_ref()
                .map_or(0.0, |pos| pos.market_value(price))
    }

    pub fn record_equity(&mut self, date: NaiveDate, price: f64) {
        let equity = self.equity(price);
        self.equity_curve.push(EquityPoint { date, equity });
    }

    pub fn realized_pnl(&self) -> f64 {
        self.trades.iter().map(|t| t.realized_pnl).sum()
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.position
            .as_ref()
            .map_or(0.0, |pos| pos.unrealized_pnl(price))
    }
}

/// Largest peak-to-trough decline as a fraction of the peak.
pub fn max_drawdown(curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;
    for point in curve {
        peak = peak.max(point.equity);
        if peak > 0.0 {
            worst = worst.max((peak - point.equity) / peak);
        }
    }
    worst
}
