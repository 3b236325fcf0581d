//! Trade statistics for the win-ratio report.

use super::position::Trade;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeStats {
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_ratio: f64,
    pub total_pnl: f64,
    pub avg_trade_duration: f64,
}

impl TradeStats {
    pub fn compute<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> Self {
        let mut stats = TradeStats::default();
        let mut total_duration_days = 0i64;

        for trade in trades {
            let pnl = trade.realized_pnl;
            if pnl > 0.0 {
                stats.trades_won += 1;
            } else if pnl < 0.0 {
                stats.trades_lost += 1;
            } else {
                stats.trades_breakeven += 1;
            }
            stats.total_trades += 1;
            stats.total_pnl += pnl;
            total_duration_days += (trade.exit_date - trade.entry_date).num_days();
        }

        if stats.total_trades > 0 {
            stats.win_ratio = stats.trades_won as f64 / stats.total_trades as f64;
            stats.avg_trade_duration = total_duration_days as f64 / stats.total_trades as f64;
        }
        stats
    }

    /// Statistics per symbol, in symbol order.
    pub fn per_symbol(trades: &[Trade]) -> BTreeMap<String, TradeStats> {
        let mut grouped: BTreeMap<&str, Vec<&Trade>> = BTreeMap::new();
        for trade in trades {
            grouped.entry(trade.symbol.as_str()).or_default().push(trade);
        }
        grouped
            .into_iter()
            .map(|(symbol, trades)| (symbol.to_string(), TradeStats::compute(trades)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trade(symbol: &str, entry_day: u32, exit_day: u32, pnl: f64) -> Trade {
        Trade {
            symbol: symbol.to_string(),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, entry_day).unwrap(),
            entry_price: 100.0,
            exit_date: NaiveDate::from_ymd_opt(2024, 1, exit_day).unwrap(),
            exit_price: 100.0 + pnl,
            quantity: 1.0,
            realized_pnl: pnl,
        }
    }

    #[test]
    fn empty_trades() {
        let stats = TradeStats::compute(&Vec::<Trade>::new());
        assert_eq!(stats.total_trades, 0);
        assert!(stats.win_ratio.abs() < f64::EPSILON);
    }

    #[test]
    fn win_ratio_counts_only_profits() {
        let trades = vec![
            trade("AAPL", 1, 3, 10.0),
            trade("AAPL", 4, 8, -5.0),
            trade("AAPL", 9, 10, 0.0),
            trade("AAPL", 11, 13, 2.0),
        ];
        let stats = TradeStats::compute(&trades);
        assert_eq!(stats.trades_won, 2);
        assert_eq!(stats.trades_lost, 1);
        assert_eq!(stats.trades_breakeven, 1);
        assert!((stats.win_ratio - 0.5).abs() < f64::EPSILON);
        assert!((stats.total_pnl - 7.0).abs() < f64::EPSILON);
        assert!((stats.avg_trade_duration - 2.25).abs() < f64::EPSILON);
    }

    #[test]
    fn per_symbol_groups_trades() {
        let trades = vec![
            trade("MSFT", 1, 2, 1.0),
            trade("AAPL", 1, 2, -1.0),
            trade("MSFT", 3, 4, 1.0),
        ];
        let stats = TradeStats::per_symbol(&trades);
        let symbols: Vec<&String> = stats.keys().collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
        assert_eq!(stats["MSFT"].total_trades, 2);
        assert!((stats["MSFT"].win_ratio - 1.0).abs() < f64::EPSILON);
        assert!(stats["AAPL"].win_ratio.abs() < f64::EPSILON);
    }
}
