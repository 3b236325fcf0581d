//! CSV results sink.
//!
//! Each update rewrites one sheet-like file in the output directory:
//! `trade_log.csv`, `win_ratio.csv` and `summary_pnl.csv`.

use crate::domain::backtest::PnlSummary;
use crate::domain::error::AppError;
use crate::domain::metrics::TradeStats;
use crate::domain::position::Trade;
use crate::ports::results_port::ResultsPort;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const TRADE_LOG_FILE: &str = "trade_log.csv";
pub const WIN_RATIO_FILE: &str = "win_ratio.csv";
pub const SUMMARY_PNL_FILE: &str = "summary_pnl.csv";

pub struct CsvResultsAdapter {
    output_dir: PathBuf,
}

fn sink_error(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::Sink {
        reason: format!("{}: {}", path.display(), e),
    }
}

impl CsvResultsAdapter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }

    fn write_sheet<R>(&self, file: &str, header: &[&str], rows: R) -> Result<(), AppError>
    where
        R: IntoIterator<Item = Vec<String>>,
    {
        fs::create_dir_all(&self.output_dir).map_err(|e| sink_error(&self.output_dir, e))?;
        let path = self.path(file);

        let mut wtr = csv::Writer::from_path(&path).map_err(|e| sink_error(&path, e))?;
        wtr.write_record(header).map_err(|e| sink_error(&path, e))?;
        let mut count = 0usize;
        for row in rows {
            wtr.write_record(&row).map_err(|e| sink_error(&path, e))?;
            count += 1;
        }
        wtr.flush().map_err(|e| sink_error(&path, e))?;

        info!(path = %path.display(), rows = count, "results written");
        Ok(())
    }
}

fn stats_row(label: &str, stats: &TradeStats) -> Vec<String> {
    vec![
        label.to_string(),
        stats.total_trades.to_string(),
        stats.trades_won.to_string(),
        stats.trades_lost.to_string(),
        format!("{:.4}", stats.win_ratio),
        format!("{:.2}", stats.total_pnl),
        format!("{:.1}", stats.avg_trade_duration),
    ]
}

impl ResultsPort for CsvResultsAdapter {
    fn log_trade_signals(&self, trade_log: &[Trade]) -> Result<(), AppError> {
        let rows = trade_log.iter().map(|t| {
            vec![
                t.symbol.clone(),
                t.entry_date.to_string(),
                format!("{:.4}", t.entry_price),
                t.exit_date.to_string(),
                format!("{:.4}", t.exit_price),
                format!("{:.6}", t.quantity),
                format!("{:.2}", t.realized_pnl),
            ]
        });
        self.write_sheet(
            TRADE_LOG_FILE,
            &[
                "symbol",
                "entry_date",
                "entry_price",
                "exit_date",
                "exit_price",
                "quantity",
                "realized_pnl",
            ],
            rows,
        )
    }

    fn update_win_ratio(&self, trade_log: &[Trade]) -> Result<(), AppError> {
        let overall = TradeStats::compute(trade_log);
        let rows = TradeStats::per_symbol(trade_log)
            .iter()
            .map(|(symbol, stats)| stats_row(symbol, stats))
            .chain(std::iter::once(stats_row("ALL", &overall)))
            .collect::<Vec<_>>();
        self.write_sheet(
            WIN_RATIO_FILE,
            &[
                "symbol",
                "total_trades",
                "wins",
                "losses",
                "win_ratio",
                "total_pnl",
                "avg_duration_days",
            ],
            rows,
        )
    }

    fn update_summary_pnl(&self, summary: &BTreeMap<String, PnlSummary>) -> Result<(), AppError> {
        let rows = summary.iter().map(|(symbol, pnl)| {
            vec![
                symbol.clone(),
                format!("{:.2}", pnl.initial_capital),
                format!("{:.2}", pnl.final_capital),
                format!("{:.2}", pnl.total_pnl),
                format!("{:.4}", pnl.max_drawdown),
            ]
        });
        self.write_sheet(
            SUMMARY_PNL_FILE,
            &[
                "symbol",
                "initial_capital",
                "final_capital",
                "total_pnl",
                "max_drawdown",
            ],
            rows,
        )
    }
}
