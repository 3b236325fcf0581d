//! Moving-average crossover strategy with an RSI overbought filter.
//!
//! BUY when the short SMA crosses above the long SMA while RSI is below the
//! overbought level. SELL when the short SMA crosses below the long SMA, or when
//! RSI crosses above the overbought level while the strategy is long.

use crate::domain::indicator::{calculate_macd_default, calculate_rsi, calculate_sma, MacdValue};
use crate::domain::ohlcv::Bar;
use std::fmt;

pub const DEFAULT_RSI_OVERBOUGHT: f64 = 70.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub rsi_period: usize,
    pub short_ma_period: usize,
    pub long_ma_period: usize,
    pub rsi_overbought: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        StrategyParams {
            rsi_period: 14,
            short_ma_period: 20,
            long_ma_period: 50,
            rsi_overbought: DEFAULT_RSI_OVERBOUGHT,
        }
    }
}

impl StrategyParams {
    /// Trailing bars needed for the latest bar to carry a defined signal.
    ///
    /// The generator tracks its own position from the first bar it sees, so a
    /// recompute over just this window always starts flat. On that path the
    /// latest signal comes from the crossover rules alone; the RSI breakout
    /// SELL needs an open position and only fires over the full history.
    pub fn signal_window(&self) -> usize {
        self.rsi_period
            .max(self.short_ma_period)
            .max(self.long_ma_period)
            + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    pub fn value(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Hold => 0,
            Signal::Sell => -1,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Hold => write!(f, "HOLD"),
            Signal::Sell => write!(f, "SELL"),
        }
    }
}

/// One input bar with the indicators computed for it and its signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBar {
    pub bar: Bar,
    pub rsi: Option<f64>,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub macd: Option<MacdValue>,
    /// `None` while the rule indicators are warming up; distinct from HOLD.
    pub signal: Option<Signal>,
}

impl SignalBar {
    /// All rule indicators and the signal are defined.
    pub fn is_complete(&self) -> bool {
        self.signal.is_some()
            && self.rsi.is_some()
            && self.short_ma.is_some()
            && self.long_ma.is_some()
    }
}

pub fn generate_signals(bars: &[Bar], params: &StrategyParams) -> Vec<SignalBar> {
    let rsi = calculate_rsi(bars, params.rsi_period);
    let short = calculate_sma(bars, params.short_ma_period);
    let long = calculate_sma(bars, params.long_ma_period);
    let macd = calculate_macd_default(bars);

    let mut long_open = false;
    let mut out = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let signal = match (rsi.get(i), short.get(i), long.get(i)) {
            (Some(cur_rsi), Some(cur_short), Some(cur_long)) if i > 0 => {
                match (short.get(i - 1), long.get(i - 1)) {
                    (Some(prev_short), Some(prev_long)) => {
                        let crossed_up = prev_short <= prev_long && cur_short > cur_long;
                        let crossed_down = prev_short >= prev_long && cur_short < cur_long;
                        let rsi_breakout = rsi
                            .get(i - 1)
                            .is_some_and(|prev| prev <= params.rsi_overbought)
                            && cur_rsi > params.rsi_overbought;

                        if crossed_up && cur_rsi < params.rsi_overbought {
                            Some(Signal::Buy)
                        } else if crossed_down || (long_open && rsi_breakout) {
                            Some(Signal::Sell)
                        } else {
                            Some(Signal::Hold)
                        }
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        match signal {
            Some(Signal::Buy) => long_open = true,
            Some(Signal::Sell) => long_open = false,
            _ => {}
        }

        out.push(SignalBar {
            bar: bar.clone(),
            rsi: rsi.get(i),
            short_ma: short.get(i),
            long_ma: long.get(i),
            macd: macd.get(i),
            signal,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn make_bars(prices: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    fn small_params() -> StrategyParams {
        StrategyParams {
            rsi_period: 3,
            short_ma_period: 2,
            long_ma_period: 4,
            rsi_overbought: 70.0,
        }
    }

    #[test]
    fn signal_values() {
        assert_eq!(Signal::Buy.value(), 1);
        assert_eq!(Signal::Hold.value(), 0);
        assert_eq!(Signal::Sell.value(), -1);
        assert_eq!(Signal::Sell.to_string(), "SELL");
    }

    #[test]
    fn signal_window_uses_longest_period() {
        let params = StrategyParams::default();
        assert_eq!(params.signal_window(), 51);
        let params = StrategyParams {
            rsi_period: 60,
            ..StrategyParams::default()
        };
        assert_eq!(params.signal_window(), 61);
    }

    #[test]
    fn output_preserves_length_and_order() {
        let bars = make_bars(&[1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0]);
        let out = generate_signals(&bars, &small_params());
        assert_eq!(out.len(), bars.len());
        for (sb, bar) in out.iter().zip(&bars) {
            assert_eq!(sb.bar.date, bar.date);
        }
    }

    #[test]
    fn warmup_bars_are_undefined_not_hold() {
        let bars = make_bars(&[10.0, 11.0, 10.5, 11.5, 12.0, 11.0, 10.0]);
        let out = generate_signals(&bars, &small_params());
        // long SMA(4) defined from index 3; crossover needs index 3 as previous.
        for sb in &out[..4] {
            assert!(sb.signal.is_none());
        }
        for sb in &out[4..] {
            assert!(sb.signal.is_some());
        }
    }

    #[test]
    fn ten_bars_with_rsi_14_are_all_undefined() {
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 2.0]);
        let params = StrategyParams {
            rsi_period: 14,
            short_ma_period: 2,
            long_ma_period: 3,
            rsi_overbought: 70.0,
        };
        let out = generate_signals(&bars, &params);
        assert!(out.iter().all(|sb| sb.signal.is_none()));
        assert!(out.iter().all(|sb| !sb.is_complete()));
    }

    #[test]
    fn flat_series_holds() {
        let bars = make_bars(&[50.0; 60]);
        let out = generate_signals(&bars, &StrategyParams::default());
        let defined: Vec<Signal> = out.iter().filter_map(|sb| sb.signal).collect();
        assert!(!defined.is_empty());
        assert!(defined.iter().all(|s| *s == Signal::Hold));
    }

    #[test]
    fn crossover_down_sells() {
        // Rising then sharply falling: short SMA drops under long SMA.
        let bars = make_bars(&[10.0, 10.0, 10.0, 10.0, 10.0, 12.0, 12.0, 6.0, 4.0]);
        let out = generate_signals(&bars, &small_params());
        assert!(out.iter().any(|sb| sb.signal == Some(Signal::Sell)));
    }

    #[test]
    fn crossover_up_blocked_when_overbought() {
        // Monotonic rise after a flat start: RSI is 100 on the crossover bar.
        let bars = make_bars(&[10.0, 10.0, 10.0, 10.0, 10.0, 11.0, 12.0, 13.0]);
        let out = generate_signals(&bars, &small_params());
        assert!(out.iter().all(|sb| sb.signal != Some(Signal::Buy)));
    }

    #[test]
    fn crossover_up_buys_below_overbought() {
        let params = StrategyParams {
            rsi_overbought: 101.0,
            ..small_params()
        };
        let bars = make_bars(&[10.0, 10.0, 10.0, 10.0, 10.0, 11.0, 12.0, 13.0]);
        let out = generate_signals(&bars, &params);
        assert_eq!(out[5].signal, Some(Signal::Buy));
    }

    #[test]
    fn rsi_breakout_sells_only_when_long() {
        // BUY at 6 (RSI ~65.7), RSI jumps from ~55.1 to ~79.7 at 8 with no crossover.
        let bars = make_bars(&[9.0, 10.0, 15.0, 6.0, 6.0, 11.0, 11.0, 10.0, 15.0]);
        let params = small_params();
        let out = generate_signals(&bars, &params);
        assert_eq!(out[6].signal, Some(Signal::Buy));
        assert_eq!(out[8].signal, Some(Signal::Sell));

        // The trailing window starts flat, so the same bar is a HOLD there.
        let window = Bar::tail(&bars, params.signal_window());
        let recent = generate_signals(window, &params);
        assert_eq!(recent.last().and_then(|sb| sb.signal), Some(Signal::Hold));
    }

    #[test]
    fn empty_input() {
        assert!(generate_signals(&[], &StrategyParams::default()).is_empty());
    }

    proptest! {
        #[test]
        fn buy_and_sell_respect_crossover_rules(
            closes in proptest::collection::vec(1.0f64..200.0, 1..80)
        ) {
            let params = small_params();
            let out = generate_signals(&make_bars(&closes), &params);
            prop_assert_eq!(out.len(), closes.len());
            for i in 0..out.len() {
                let sb = &out[i];
                if let Some(signal) = sb.signal {
                    prop_assert!(sb.is_complete());
                    prop_assert!([-1, 0, 1].contains(&signal.value()));
                    if signal == Signal::Buy {
                        let prev = &out[i - 1];
                        prop_assert!(prev.short_ma.unwrap() <= prev.long_ma.unwrap());
                        prop_assert!(sb.short_ma.unwrap() > sb.long_ma.unwrap());
                        prop_assert!(sb.rsi.unwrap() < params.rsi_overbought);
                    }
                }
            }
        }
    }
}
