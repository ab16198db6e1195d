//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_adapter::JsonAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest::run_backtest;
use crate::domain::error::SmacrossError;
use crate::domain::quote::Quote;
use crate::domain::sma::{annotate_sma, SmaParams};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "smacross", about = "SMA crossover backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the crossover backtest and print the trade report
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        window: Option<usize>,
        #[arg(long)]
        offset: Option<usize>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the SMA-annotated series as CSV on stdout
    Annotate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        window: Option<usize>,
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Show data range for a symbol
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
    /// List symbols available under the configured data path
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            window,
            offset,
            output,
        } => run_backtest_cmd(&config, symbol.as_deref(), window, offset, output.as_ref()),
        Command::Annotate {
            config,
            symbol,
            window,
            offset,
        } => run_annotate(&config, symbol.as_deref(), window, offset),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SmacrossError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// SMA parameters from config, with CLI flags taking precedence.
pub fn build_sma_params(
    config: &dyn ConfigPort,
    window_override: Option<usize>,
    offset_override: Option<usize>,
) -> Result<SmaParams, SmacrossError> {
    let window = match window_override {
        Some(w) => w as i64,
        None => config.get_int("sma", "window", 100),
    };
    let offset = match offset_override {
        Some(o) => o as i64,
        None => config.get_int("sma", "offset", 0),
    };

    if window < 1 {
        return Err(SmacrossError::ConfigInvalid {
            section: "sma".into(),
            key: "window".into(),
            reason: "window must be >= 1".into(),
        });
    }
    if offset < 0 {
        return Err(SmacrossError::ConfigInvalid {
            section: "sma".into(),
            key: "offset".into(),
            reason: "offset must be >= 0".into(),
        });
    }

    Ok(SmaParams::new(window as usize, offset as usize))
}

pub fn build_data_port(config: &dyn ConfigPort) -> Result<Box<dyn DataPort>, SmacrossError> {
    let path = config
        .get_string("data", "path")
        .ok_or_else(|| SmacrossError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;

    let format = config
        .get_string("data", "format")
        .unwrap_or_else(|| "csv".to_string());

    match format.to_lowercase().as_str() {
        "csv" => Ok(Box::new(CsvAdapter::new(PathBuf::from(path)))),
        "json" => Ok(Box::new(JsonAdapter::new(PathBuf::from(path)))),
        other => Err(SmacrossError::ConfigInvalid {
            section: "data".into(),
            key: "format".into(),
            reason: format!("unknown format {:?} (expected csv or json)", other),
        }),
    }
}

pub fn resolve_symbol(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Option<String> {
    if let Some(s) = symbol_override {
        return Some(s.to_uppercase());
    }
    config
        .get_string("data", "symbol")
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
}

pub fn build_date_range(
    config: &dyn ConfigPort,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), SmacrossError> {
    let parse = |key: &str| -> Result<Option<NaiveDate>, SmacrossError> {
        match config.get_string("data", key) {
            Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| SmacrossError::ConfigInvalid {
                    section: "data".into(),
                    key: key.into(),
                    reason: "invalid date format (expected YYYY-MM-DD)".into(),
                }),
            None => Ok(None),
        }
    };
    Ok((parse("start_date")?, parse("end_date")?))
}

/// Load the quote series for one symbol and reject series too short for
/// the requested parameters (the scan would have no defined-SMA point).
fn load_quotes(
    config: &dyn ConfigPort,
    symbol_override: Option<&str>,
    params: &SmaParams,
) -> Result<(String, Vec<Quote>), SmacrossError> {
    let symbol = resolve_symbol(symbol_override, config).ok_or_else(|| {
        SmacrossError::ConfigMissing {
            section: "data".into(),
            key: "symbol".into(),
        }
    })?;

    let data_port = build_data_port(config)?;
    let (start, end) = build_date_range(config)?;

    let quotes = data_port.fetch_quotes(&symbol, start, end)?;
    if quotes.is_empty() {
        return Err(SmacrossError::NoData { symbol });
    }

    let minimum = params.warmup() + 1;
    if quotes.len() < minimum {
        return Err(SmacrossError::InsufficientData {
            symbol,
            rows: quotes.len(),
            minimum,
        });
    }

    Ok((symbol, quotes))
}

fn run_backtest_cmd(
    config_path: &PathBuf,
    symbol: Option<&str>,
    window: Option<usize>,
    offset: Option<usize>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let params = match build_sma_params(&config, window, offset) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let (symbol, mut quotes) = match load_quotes(&config, symbol, &params) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Running backtest: {} ({} quotes, SMA window {}, offset {})",
        symbol,
        quotes.len(),
        params.window,
        params.offset,
    );

    let result = run_backtest(&mut quotes, &params);

    eprintln!("\n=== Results ===");
    eprintln!("Trades:        {}", result.summary.total);
    eprintln!(
        "Wins:          {} ({:.2}%)",
        result.summary.win_count, result.summary.win_pct
    );
    eprintln!(
        "Losses:        {} ({:.2}%)",
        result.summary.loss_count, result.summary.loss_pct
    );
    eprintln!("Net:           {:.2}", result.summary.net);
    eprintln!("Expectancy:    {:.0}", result.summary.expectancy);

    print!("{}", TextReportAdapter::render(&result, &symbol, &params));

    if let Some(output) = output_path {
        let path = output.display().to_string();
        match TextReportAdapter.write(&result, &symbol, &params, &path) {
            Ok(()) => eprintln!("\nReport written to: {}", path),
            Err(e) => {
                eprintln!("error: failed to write report: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_annotate(
    config_path: &PathBuf,
    symbol: Option<&str>,
    window: Option<usize>,
    offset: Option<usize>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let params = match build_sma_params(&config, window, offset) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let (symbol, mut quotes) = match load_quotes(&config, symbol, &params) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    annotate_sma(&mut quotes, &params);

    eprintln!(
        "Annotated {} quotes for {} (window {}, offset {})",
        quotes.len(),
        symbol,
        params.window,
        params.offset,
    );

    println!("date,close,sma");
    for quote in &quotes {
        if quote.has_sma() {
            println!("{},{},{}", quote.date, quote.close, quote.sma);
        } else {
            println!("{},{},", quote.date, quote.close);
        }
    }

    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, symbol: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let symbol = match resolve_symbol(symbol, &config) {
        Some(s) => s,
        None => {
            eprintln!("error: symbol is required (use --symbol or set [data] symbol)");
            return ExitCode::from(2);
        }
    };

    let data_port = match build_data_port(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match data_port.get_data_range(&symbol) {
        Ok(Some((min_date, max_date, count))) => {
            println!("{}: {} rows, {} to {}", symbol, count, min_date, max_date);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no data found", symbol);
            ExitCode::from(5)
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_port = match build_data_port(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match data_port.list_symbols() {
        Ok(symbols) => {
            if symbols.is_empty() {
                eprintln!("No symbols found");
            } else {
                for symbol in &symbols {
                    println!("{}", symbol);
                }
                eprintln!("{} symbols found", symbols.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
