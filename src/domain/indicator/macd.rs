//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line, seeded with the first MACD value
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: all three components are undefined for the first max(fast, slow) - 1
//! bars and defined from then on.

use crate::domain::indicator::ema::{ema_seeded, ema_values};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValue {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    pub values: Vec<Option<MacdValue>>,
}

impl MacdSeries {
    pub fn get(&self, index: usize) -> Option<MacdValue> {
        self.values.get(index).copied().flatten()
    }
}

pub fn calculate_macd(bars: &[Bar], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let ema_fast = ema_values(&closes, fast);
    let ema_slow = ema_values(&closes, slow);

    let line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal = ema_seeded(&line, signal_period);

    let values = line
        .iter()
        .zip(&signal)
        .map(|(l, s)| {
            let (line, signal) = ((*l)?, (*s)?);
            Some(MacdValue {
                line,
                signal,
                histogram: line - signal,
            })
        })
        .collect();

    MacdSeries {
        fast,
        slow,
        signal: signal_period,
        values,
    }
}

pub fn calculate_macd_default(bars: &[Bar]) -> MacdSeries {
    calculate_macd(bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
