//! CSV file market data adapter.
//!
//! Reads `<dir>/<SYMBOL>.csv` with header `date,open,high,low,close,volume`.
//! A missing or unreadable file yields an empty series for that symbol; only
//! a missing data directory fails the whole request.

use crate::domain::error::AppError;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::MarketDataPort;
use chrono::{Months, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    /// All bars in a symbol's file, sorted by date. `None` if the file is absent.
    pub fn read_bars(&self, symbol: &str) -> Result<Option<Vec<Bar>>, AppError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| AppError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| AppError::Data {
                reason: format!("{}: CSV parse error: {}", path.display(), e),
            })?;
            let field = |idx: usize, name: &str| {
                record.get(idx).map(str::trim).ok_or_else(|| AppError::Data {
                    reason: format!("{} row {}: missing {} column", path.display(), line + 1, name),
                })
            };
            let number = |idx: usize, name: &str| -> Result<f64, AppError> {
                field(idx, name)?.parse().map_err(|e| AppError::Data {
                    reason: format!("{} row {}: invalid {} value: {}", path.display(), line + 1, name, e),
                })
            };

            let date = NaiveDate::parse_from_str(field(0, "date")?, "%Y-%m-%d").map_err(|e| {
                AppError::Data {
                    reason: format!("{} row {}: invalid date format: {}", path.display(), line + 1, e),
                }
            })?;
            let volume: i64 = field(5, "volume")?.parse().map_err(|e| AppError::Data {
                reason: format!("{} row {}: invalid volume value: {}", path.display(), line + 1, e),
            })?;

            bars.push(Bar {
                date,
                open: number(1, "open")?,
                high: number(2, "high")?,
                low: number(3, "low")?,
                close: number(4, "close")?,
                volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(Some(bars))
    }
}

/// Bars dated within `months` calendar months of the latest bar.
fn trailing_months(bars: Vec<Bar>, months: u32) -> Vec<Bar> {
    let cutoff = match bars.last() {
        Some(last) => last.date.checked_sub_months(Months::new(months)),
        None => return bars,
    };
    match cutoff {
        Some(cutoff) => bars.into_iter().filter(|b| b.date > cutoff).collect(),
        None => bars,
    }
}

impl MarketDataPort for CsvDataAdapter {
    fn get_historical_data(
        &self,
        symbols: &BTreeSet<String>,
        months: u32,
    ) -> Result<BTreeMap<String, Vec<Bar>>, AppError> {
        if !self.base_path.is_dir() {
            return Err(AppError::Data {
                reason: format!("data directory {} not found", self.base_path.display()),
            });
        }

        let mut history = BTreeMap::new();
        for symbol in symbols {
            let bars = match self.read_bars(symbol) {
                Ok(Some(bars)) => trailing_months(bars, months),
                Ok(None) => {
                    warn!(symbol = %symbol, path = %self.csv_path(symbol).display(), "no data file");
                    Vec::new()
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "unreadable data file, skipping symbol");
                    Vec::new()
                }
            };
            debug!(symbol = %symbol, bars = bars.len(), "loaded history");
            history.insert(symbol.clone(), bars);
        }
        Ok(history)
    }
}
