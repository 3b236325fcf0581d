#![allow(dead_code)]

use algotrader::domain::backtest::PnlSummary;
use algotrader::domain::error::AppError;
use algotrader::domain::features::{Feature, Target};
use algotrader::domain::model::ModelKind;
use algotrader::domain::ohlcv::Bar;
use algotrader::domain::position::Trade;
use algotrader::domain::settings::Settings;
use algotrader::domain::strategy::StrategyParams;
use algotrader::ports::alert_port::AlertPort;
use algotrader::ports::data_port::MarketDataPort;
use algotrader::ports::results_port::ResultsPort;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub struct MockDataPort {
    data: BTreeMap<String, Vec<Bar>>,
    error: Option<String>,
    pub requests: RefCell<Vec<(BTreeSet<String>, u32)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            error: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn failing(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl MarketDataPort for MockDataPort {
    fn get_historical_data(
        &self,
        symbols: &BTreeSet<String>,
        months: u32,
    ) -> Result<BTreeMap<String, Vec<Bar>>, AppError> {
        self.requests.borrow_mut().push((symbols.clone(), months));
        if let Some(reason) = &self.error {
            return Err(AppError::Data {
                reason: reason.clone(),
            });
        }
        Ok(symbols
            .iter()
            .map(|s| (s.clone(), self.data.get(s).cloned().unwrap_or_default()))
            .collect())
    }
}

#[derive(Default)]
pub struct RecordingResultsPort {
    pub trade_logs: RefCell<Vec<Vec<Trade>>>,
    pub win_ratio_logs: RefCell<Vec<Vec<Trade>>>,
    pub summaries: RefCell<Vec<BTreeMap<String, PnlSummary>>>,
    pub fail: bool,
}

impl RecordingResultsPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            Err(AppError::Sink {
                reason: "sheet unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl ResultsPort for RecordingResultsPort {
    fn log_trade_signals(&self, trade_log: &[Trade]) -> Result<(), AppError> {
        self.trade_logs.borrow_mut().push(trade_log.to_vec());
        self.check()
    }

    fn update_win_ratio(&self, trade_log: &[Trade]) -> Result<(), AppError> {
        self.win_ratio_logs.borrow_mut().push(trade_log.to_vec());
        self.check()
    }

    fn update_summary_pnl(&self, summary: &BTreeMap<String, PnlSummary>) -> Result<(), AppError> {
        self.summaries.borrow_mut().push(summary.clone());
        self.check()
    }
}

pub struct RecordingAlertPort {
    pub sent: RefCell<Vec<String>>,
    succeed: bool,
}

impl RecordingAlertPort {
    pub fn new() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            succeed: true,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            succeed: false,
        }
    }
}

impl AlertPort for RecordingAlertPort {
    fn send_alert(&self, text: &str) -> bool {
        self.sent.borrow_mut().push(text.to_string());
        self.succeed
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let start = date(2024, 1, 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 1000 + ((i * 37) % 11) as i64 * 50,
        })
        .collect()
}

pub fn flat_bars(count: usize, price: f64) -> Vec<Bar> {
    bars_from_closes(&vec![price; count])
}

/// Oscillating series long enough to train on with default parameters.
pub fn wave_bars(count: usize) -> Vec<Bar> {
    let closes: Vec<f64> = (0..count)
        .map(|i| 100.0 + (i as f64 * 0.45).sin() * 8.0 + i as f64 * 0.05)
        .collect();
    bars_from_closes(&closes)
}

/// Parameters small enough to hand-check crossovers on a dozen bars.
pub fn small_params() -> StrategyParams {
    StrategyParams {
        rsi_period: 3,
        short_ma_period: 2,
        long_ma_period: 4,
        rsi_overbought: 70.0,
    }
}

/// Under [`small_params`]: BUY at index 7 (close 7), SELL at index 11 (close 6),
/// HOLD on the final bar.
pub const ROUND_TRIP_CLOSES: [f64; 13] = [
    10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 6.0, 7.0, 7.0, 7.0, 7.0, 6.0, 6.0,
];

/// Parameters for [`crossover_closes`].
pub fn crossover_params() -> StrategyParams {
    StrategyParams {
        rsi_period: 14,
        short_ma_period: 4,
        long_ma_period: 12,
        rsi_overbought: 70.0,
    }
}

/// 60 zig-zag closes: drifting down, up from bar 25, down again from bar 42.
/// Under [`crossover_params`] the SMAs cross up at bar 30 and down at bar 45
/// with RSI staying below 61.
pub fn crossover_closes() -> Vec<f64> {
    let mut closes = vec![100.0];
    for i in 1..60 {
        let rising = (25..42).contains(&i);
        let step = match (rising, i % 2 == 0) {
            (true, true) => 1.5,
            (true, false) => -0.5,
            (false, true) => -1.5,
            (false, false) => 0.5,
        };
        closes.push(closes[i - 1] + step);
    }
    closes
}

pub fn settings(symbols: &[&str]) -> Settings {
    Settings {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        months: 6,
        initial_capital: 10_000.0,
        strategy: StrategyParams::default(),
        features: Feature::ALL.to_vec(),
        target: Target::Label,
        model: ModelKind::DecisionTree,
        validation_fraction: 0.2,
        data_dir: PathBuf::from("data"),
        output_dir: PathBuf::from("output"),
        alerts_enabled: true,
    }
}
