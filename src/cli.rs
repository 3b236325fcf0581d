//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::csv_results_adapter::CsvResultsAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::log_alert_adapter::LogAlertAdapter;
use crate::domain::error::AppError;
use crate::domain::orchestrator::{AlertStatus, Orchestrator, RunReport};
use crate::domain::settings::Settings;
use crate::ports::alert_port::AlertPort;
use crate::ports::data_port::MarketDataPort;
use crate::ports::results_port::ResultsPort;

#[derive(Parser, Debug)]
#[command(
    name = "algotrader",
    about = "Signal generation, backtesting and next-day prediction"
)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backtest, train and report on every configured symbol
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file without touching any data
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Install the stderr `fmt` subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run { config } => run_algo(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_settings(path: &Path) -> Result<Settings, AppError> {
    info!(path = %path.display(), "loading config");
    let adapter = FileConfigAdapter::from_file(path)?;
    Settings::from_config(&adapter)
}

fn run_algo(config_path: &Path) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    let data_port = CsvDataAdapter::new(settings.data_dir.clone());
    let results_port = CsvResultsAdapter::new(settings.output_dir.clone());
    let alert_port = LogAlertAdapter::new(settings.alerts_enabled);

    run_pipeline(&settings, &data_port, &results_port, &alert_port)
}

/// Run the orchestrator against the given ports and print a console summary.
pub fn run_pipeline(
    settings: &Settings,
    data_port: &dyn MarketDataPort,
    results_port: &dyn ResultsPort,
    alert_port: &dyn AlertPort,
) -> ExitCode {
    let orchestrator = Orchestrator::new(settings, data_port, results_port, alert_port);
    match orchestrator.run() {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

fn print_summary(report: &RunReport) {
    if !report.accuracies.is_empty() {
        eprintln!("\n=== Model Accuracy ===");
        for (symbol, accuracy) in &report.accuracies {
            match accuracy {
                Some(acc) => eprintln!("  {}: {:.1}%", symbol, acc * 100.0),
                None => eprintln!("  {}: n/a (no validation rows)", symbol),
            }
        }
    }

    if !report.pnl.is_empty() {
        eprintln!("\n=== Backtest PnL ===");
        for (symbol, pnl) in &report.pnl {
            let sign = if pnl.total_pnl >= 0.0 { "+" } else { "" };
            eprintln!(
                "  {}:  {:.2} -> {:.2} ({}{:.2}, max drawdown {:.1}%)",
                symbol,
                pnl.initial_capital,
                pnl.final_capital,
                sign,
                pnl.total_pnl,
                pnl.max_drawdown * 100.0
            );
        }
        eprintln!("  Trades: {}", report.trade_log.len());
    }

    if !report.outlooks.is_empty() {
        eprintln!("\n=== Current Signals ===");
        for outlook in &report.outlooks {
            let alert = match outlook.alert {
                AlertStatus::NotRequired => "",
                AlertStatus::Sent => " [alerted]",
                AlertStatus::Failed => " [alert failed]",
            };
            eprintln!(
                "  {} {}: {} at {:.2}, next day: {}{}",
                outlook.symbol, outlook.date, outlook.signal, outlook.close, outlook.prediction, alert
            );
        }
    }

    if !report.skipped.is_empty() {
        eprintln!("\nSkipped (no data): {}", report.skipped.join(", "));
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    let symbols: Vec<&str> = settings.symbols.iter().map(String::as_str).collect();
    let features: Vec<String> = settings.features.iter().map(|f| f.to_string()).collect();
    let params = &settings.strategy;

    eprintln!("Configuration is valid\n");
    eprintln!("Universe:");
    eprintln!("  symbols: {}", symbols.join(", "));
    eprintln!("  months:  {}", settings.months);
    eprintln!("  data:    {}", settings.data_dir.display());
    eprintln!("\nStrategy:");
    eprintln!(
        "  RSI({}) < {} with SMA({}) / SMA({}) crossover",
        params.rsi_period, params.rsi_overbought, params.short_ma_period, params.long_ma_period
    );
    eprintln!("  initial capital: {:.2}", settings.initial_capital);
    eprintln!("\nModel:");
    eprintln!("  {} on [{}]", settings.model, features.join(", "));
    eprintln!("  validation fraction: {}", settings.validation_fraction);
    eprintln!("\nOutput: {}", settings.output_dir.display());
    eprintln!(
        "Alerts: {}",
        if settings.alerts_enabled { "enabled" } else { "disabled" }
    );
    ExitCode::SUCCESS
}
