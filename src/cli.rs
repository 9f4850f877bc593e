//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console_progress::ConsoleProgress;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestOutcome, BacktestParams};
use crate::domain::config_validation::{parse_date, validate_backtest_config};
use crate::domain::error::MacdvolError;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "macdvol", about = "MACD + volume-filter strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over CSV bar data
    Backtest {
        /// INI config file with [backtest] and [strategy] sections
        #[arg(short, long)]
        config: PathBuf,
        /// Directory containing {symbol}.csv files
        #[arg(short, long)]
        data: PathBuf,
        /// Override the configured symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Override the configured start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Override the configured end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Print the completed-trade list after the report
        #[arg(long)]
        trades: bool,
    },
    /// Validate a config file without running anything
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range available for a symbol
    Info {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        symbol: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data,
            symbol,
            start,
            end,
            trades,
        } => run_backtest_cmd(
            &config,
            &data,
            symbol.as_deref(),
            start.as_deref(),
            end.as_deref(),
            trades,
        ),
        Command::Validate { config } => run_validate(&config),
        Command::Info { data, symbol } => run_info(&data, &symbol),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = MacdvolError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Assemble run parameters from the config file plus CLI overrides.
pub fn build_params(
    config: &dyn ConfigPort,
    symbol_override: Option<&str>,
    start_override: Option<&str>,
    end_override: Option<&str>,
) -> Result<BacktestParams, MacdvolError> {
    let symbol = match symbol_override {
        Some(s) => s.to_string(),
        None => config
            .get_string("backtest", "symbol")
            .ok_or_else(|| MacdvolError::ConfigMissing {
                section: "backtest".into(),
                key: "symbol".into(),
            })?,
    };

    let start_str = start_override
        .map(str::to_string)
        .or_else(|| config.get_string("backtest", "start_date"));
    let end_str = end_override
        .map(str::to_string)
        .or_else(|| config.get_string("backtest", "end_date"));

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    let mut params = BacktestParams::new(symbol, start_date, end_date);
    params.initial_cash = config.get_double("backtest", "initial_cash", params.initial_cash);
    params.fast = config.get_int("strategy", "fast_period", params.fast as i64) as usize;
    params.slow = config.get_int("strategy", "slow_period", params.slow as i64) as usize;
    params.signal = config.get_int("strategy", "signal_period", params.signal as i64) as usize;
    params.volume_window =
        config.get_int("strategy", "volume_window", params.volume_window as i64) as usize;
    params.volume_factor = config.get_double("strategy", "volume_factor", params.volume_factor);
    params.validate()?;
    Ok(params)
}

fn run_backtest_cmd(
    config_path: &PathBuf,
    data_path: &PathBuf,
    symbol_override: Option<&str>,
    start_override: Option<&str>,
    end_override: Option<&str>,
    show_trades: bool,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = match build_params(&adapter, symbol_override, start_override, end_override) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let progress = ConsoleProgress;
    let data_port = CsvAdapter::new(data_path.clone());

    let bars = match data_port.fetch_bars(&params.symbol, params.start_date, params.end_date) {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let outcome = match run_backtest(&bars, &params, &progress) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_report(&params, &outcome, show_trades);
    ExitCode::SUCCESS
}

fn print_report(params: &BacktestParams, outcome: &BacktestOutcome, show_trades: bool) {
    println!(
        "Backtest {} ({} ~ {})",
        params.symbol, params.start_date, params.end_date
    );
    println!(
        "MACD({},{},{}) volume filter: {}-bar avg x {}",
        params.fast, params.slow, params.signal, params.volume_window, params.volume_factor
    );
    println!();

    for (name, value) in outcome.report.display_rows() {
        println!("{name:<20} {value}");
    }

    let benchmark_final = outcome.benchmark.last().copied().unwrap_or(params.initial_cash);
    println!(
        "{:<20} {:.2} ({:+.2}%)",
        "Buy & hold",
        benchmark_final,
        (benchmark_final / params.initial_cash - 1.0) * 100.0
    );

    if let Some(open) = &outcome.open_position_at_end {
        println!();
        println!(
            "note: {} shares entered {} at {:.2} are still open; excluded from trade count and win rate",
            open.shares, open.entry_date, open.entry_price
        );
    }

    if show_trades && !outcome.trades.is_empty() {
        println!();
        println!("{:<12} {:<12} {:>10} {:>10} {:>8} {:>9}", "entry", "exit", "in", "out", "days", "return");
        for trade in &outcome.trades {
            println!(
                "{:<12} {:<12} {:>10.2} {:>10.2} {:>8} {:>8.2}%",
                trade.entry_date.to_string(),
                trade.exit_date.to_string(),
                trade.entry_price,
                trade.exit_price,
                trade.holding_days(),
                trade.return_pct() * 100.0
            );
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match validate_backtest_config(&adapter) {
        Ok(()) => {
            println!("config ok");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(data_path: &PathBuf, symbol: &str) -> ExitCode {
    let data_port = CsvAdapter::new(data_path.clone());
    match data_port.data_range(symbol) {
        Ok(Some((first, last, count))) => {
            println!("{symbol}: {count} bars from {first} to {last}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("{symbol}: no bars");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
