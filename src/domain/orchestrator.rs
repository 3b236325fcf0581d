//! Run orchestration.
//!
//! One run fetches history for every configured symbol, then for each symbol
//! with data trains a predictor, backtests the strategy and recomputes the
//! current signal and next-bar prediction from trailing windows. Per-symbol
//! outcomes are folded into a single [`RunReport`], delivered to the results
//! sink, and actionable outlooks are dispatched as alerts.
//!
//! A symbol that cannot be processed is logged and skipped; only a provider
//! failure or a run with no data at all aborts.

use crate::domain::backtest::{run_backtest, BacktestResult, PnlSummary};
use crate::domain::error::AppError;
use crate::domain::features::{prediction_window, prepare_data_for_ml};
use crate::domain::ohlcv::Bar;
use crate::domain::position::Trade;
use crate::domain::predictor::{MlPredictor, Prediction};
use crate::domain::settings::Settings;
use crate::domain::strategy::{generate_signals, Signal};
use crate::ports::alert_port::AlertPort;
use crate::ports::data_port::MarketDataPort;
use crate::ports::results_port::ResultsPort;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    NotRequired,
    Sent,
    Failed,
}

/// Latest signal and next-bar prediction for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentOutlook {
    pub symbol: String,
    pub date: NaiveDate,
    pub close: f64,
    pub signal: Signal,
    pub prediction: Prediction,
    pub alert: AlertStatus,
}

impl CurrentOutlook {
    pub fn is_actionable(&self) -> bool {
        self.signal != Signal::Hold || self.prediction.is_available()
    }
}

/// Everything one run produced, in symbol order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Validation accuracy per trained symbol; `None` when no rows were held out.
    pub accuracies: BTreeMap<String, Option<f64>>,
    pub trade_log: Vec<Trade>,
    pub pnl: BTreeMap<String, PnlSummary>,
    pub outlooks: Vec<CurrentOutlook>,
    /// Symbols the provider returned no bars for.
    pub skipped: Vec<String>,
}

impl RunReport {
    fn absorb(mut self, outcome: SymbolOutcome) -> Self {
        match outcome {
            SymbolOutcome::Empty { symbol } => self.skipped.push(symbol),
            SymbolOutcome::Processed {
                symbol,
                accuracy,
                backtest,
                outlook,
            } => {
                if let Some(accuracy) = accuracy {
                    self.accuracies.insert(symbol.clone(), accuracy);
                }
                if let Some(result) = backtest {
                    self.pnl.insert(symbol, result.summary());
                    self.trade_log.extend(result.trade_log);
                }
                self.outlooks.push(outlook);
            }
        }
        self
    }
}

enum SymbolOutcome {
    Empty {
        symbol: String,
    },
    Processed {
        symbol: String,
        /// Outer `None`: the predictor could not be trained.
        accuracy: Option<Option<f64>>,
        backtest: Option<BacktestResult>,
        outlook: CurrentOutlook,
    },
}

pub struct Orchestrator<'a> {
    settings: &'a Settings,
    data: &'a dyn MarketDataPort,
    results: &'a dyn ResultsPort,
    alerts: &'a dyn AlertPort,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        settings: &'a Settings,
        data: &'a dyn MarketDataPort,
        results: &'a dyn ResultsPort,
        alerts: &'a dyn AlertPort,
    ) -> Self {
        Orchestrator {
            settings,
            data,
            results,
            alerts,
        }
    }

    pub fn run(&self) -> Result<RunReport, AppError> {
        info!(
            symbols = self.settings.symbols.len(),
            months = self.settings.months,
            "fetching historical data"
        );
        let history = self
            .data
            .get_historical_data(&self.settings.symbols, self.settings.months)
            .map_err(|e| {
                warn!(error = %e, "market data provider failed");
                AppError::DataUnavailable
            })?;

        if history.values().all(Vec::is_empty) {
            return Err(AppError::DataUnavailable);
        }

        let report = history
            .iter()
            .map(|(symbol, bars)| self.process_symbol(symbol, bars))
            .fold(RunReport::default(), RunReport::absorb);

        info!(
            trained = report.accuracies.len(),
            backtested = report.pnl.len(),
            trades = report.trade_log.len(),
            "symbols processed"
        );

        self.deliver(&report);

        let outlooks = report
            .outlooks
            .into_iter()
            .map(|outlook| self.dispatch_alert(outlook))
            .collect();

        Ok(RunReport {
            outlooks,
            ..report
        })
    }

    fn process_symbol(&self, symbol: &str, bars: &[Bar]) -> SymbolOutcome {
        if bars.is_empty() {
            warn!(symbol, "no data, skipping");
            return SymbolOutcome::Empty {
                symbol: symbol.to_string(),
            };
        }

        let settings = self.settings;
        let mut predictor = MlPredictor::new(
            settings.model,
            settings.strategy.rsi_period,
            settings.validation_fraction,
        );

        let rows = prepare_data_for_ml(bars, settings.strategy.rsi_period);
        let accuracy = if rows.is_empty() {
            warn!(symbol, bars = bars.len(), "could not prepare training data");
            None
        } else {
            let (accuracy, model) =
                predictor.train_model(&rows, &settings.features, settings.target);
            if model.is_trained() {
                info!(symbol, rows = rows.len(), accuracy = ?accuracy, model = %settings.model, "model trained");
                Some(accuracy)
            } else {
                warn!(symbol, "model could not be trained");
                None
            }
        };

        let signals = generate_signals(bars, &settings.strategy);
        let backtest = run_backtest(symbol, &signals, settings.initial_capital);
        match &backtest {
            Some(result) => info!(
                symbol,
                trades = result.trade_log.len(),
                total_pnl = result.total_pnl,
                final_capital = result.final_capital,
                "backtest complete"
            ),
            None => warn!(symbol, "backtest yielded no results"),
        }

        let outlook = self.current_outlook(symbol, bars, &predictor);
        SymbolOutcome::Processed {
            symbol: symbol.to_string(),
            accuracy,
            backtest,
            outlook,
        }
    }

    fn current_outlook(&self, symbol: &str, bars: &[Bar], predictor: &MlPredictor) -> CurrentOutlook {
        let params = &self.settings.strategy;
        let window = Bar::tail(bars, params.signal_window());
        let latest = generate_signals(window, params).pop();

        let (signal, date, close) = match latest {
            Some(sb) if sb.is_complete() => (
                sb.signal.unwrap_or(Signal::Hold),
                sb.bar.date,
                sb.bar.close,
            ),
            _ => {
                warn!(symbol, "latest bar has no complete signal, using HOLD");
                let last = &bars[bars.len() - 1];
                (Signal::Hold, last.date, last.close)
            }
        };
        info!(symbol, %date, %signal, close, "latest strategy signal");

        let recent = Bar::tail(bars, prediction_window(params.rsi_period));
        let prediction = predictor.predict_next_day_movement(recent, &self.settings.features);
        if prediction.is_available() {
            info!(symbol, %prediction, "next day prediction");
        } else {
            warn!(symbol, %prediction, "next day prediction unavailable");
        }

        CurrentOutlook {
            symbol: symbol.to_string(),
            date,
            close,
            signal,
            prediction,
            alert: AlertStatus::NotRequired,
        }
    }

    fn deliver(&self, report: &RunReport) {
        if report.trade_log.is_empty() {
            info!("no trades to log");
        } else {
            if let Err(e) = self.results.log_trade_signals(&report.trade_log) {
                warn!(error = %e, "failed to log trade signals");
            }
            if let Err(e) = self.results.update_win_ratio(&report.trade_log) {
                warn!(error = %e, "failed to update win ratio");
            }
        }

        if report.pnl.is_empty() {
            info!("no summary pnl to write");
        } else if let Err(e) = self.results.update_summary_pnl(&report.pnl) {
            warn!(error = %e, "failed to update summary pnl");
        }
    }

    fn dispatch_alert(&self, outlook: CurrentOutlook) -> CurrentOutlook {
        if !outlook.is_actionable() {
            debug!(symbol = %outlook.symbol, "nothing to alert");
            return outlook;
        }

        let mut message = self.results.format_signal_alert(
            &outlook.symbol,
            outlook.date,
            outlook.signal,
            outlook.close,
        );
        message.push_str(&format!("\nML Prediction (Next Day): {}", outlook.prediction));

        let alert = if self.alerts.send_alert(&message) {
            AlertStatus::Sent
        } else {
            warn!(symbol = %outlook.symbol, "alert dispatch failed");
            AlertStatus::Failed
        };
        CurrentOutlook { alert, ..outlook }
    }
}
