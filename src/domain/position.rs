//! Open positions and closed round-trip trades.

use chrono::NaiveDate;

/// A long holding. Quantity may be fractional.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub quantity: f64,
}

impl Position {
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.quantity * (price - self.entry_price)
    }

    /// Close at `exit_price`, producing the round-trip record.
    pub fn close(self, symbol: &str, exit_date: NaiveDate, exit_price: f64) -> Trade {
        Trade {
            symbol: symbol.to_string(),
            entry_date: self.entry_date,
            entry_price: self.entry_price,
            exit_date,
            exit_price,
            quantity: self.quantity,
            realized_pnl: self.unrealized_pnl(exit_price),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub symbol: String,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub exit_date: NaiveDate,
    pub exit_price: f64,
    pub quantity: f64,
    pub realized_pnl: f64,
}

impl Trade {
    pub fn is_win(&self) -> bool {
        self.realized_pnl > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_position() -> Position {
        Position {
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            entry_price: 50.0,
            quantity: 100.0,
        }
    }

    #[test]
    fn market_value() {
        assert!((sample_position().market_value(55.0) - 5500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unrealized_pnl_profit_and_loss() {
        let pos = sample_position();
        assert!((pos.unrealized_pnl(55.0) - 500.0).abs() < f64::EPSILON);
        assert!((pos.unrealized_pnl(45.0) + 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fractional_quantity() {
        let pos = Position {
            quantity: 2.5,
            ..sample_position()
        };
        assert!((pos.unrealized_pnl(54.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn close_records_trade() {
        let exit = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let trade = sample_position().close("AAPL", exit, 55.0);
        assert_eq!(trade.symbol, "AAPL");
        assert_eq!(trade.exit_date, exit);
        assert!((trade.exit_price - 55.0).abs() < f64::EPSILON);
        assert!((trade.realized_pnl - 500.0).abs() < f64::EPSILON);
        assert!(trade.is_win());
    }

    #[test]
    fn breakeven_is_not_a_win() {
        let exit = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let trade = sample_position().close("AAPL", exit, 50.0);
        assert!(!trade.is_win());
    }
}
