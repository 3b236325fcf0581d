//! OHLCV bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Bar {
    /// Trailing `n` bars of a series (the whole series when it is shorter).
    pub fn tail(bars: &[Bar], n: usize) -> &[Bar] {
        &bars[bars.len().saturating_sub(n)..]
    }
}
