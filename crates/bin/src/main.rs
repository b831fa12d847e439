//! Greenblatt CLI binary.
//!
//! Loads the company panel and benchmark CSVs, runs the Magic Formula
//! backtest, writes the comparison table, and prints a summary.

use clap::Parser;
use greenblatt::{MagicFormulaBacktest, ScreenConfig};
use greenblatt_data::{load_benchmark_series, load_company_panel};
use greenblatt_output::{BacktestSummary, ExportFormat, Exporter};
use std::error::Error;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "greenblatt")]
#[command(about = "Magic Formula equity screen backtest", long_about = None)]
#[command(version)]
struct Cli {
    /// CSV file with the company panel
    /// (ticker,date,adjusted_close,traded_volume,ebit_ev,roic)
    #[arg(long)]
    companies: PathBuf,

    /// CSV file with the benchmark price series (date,close)
    #[arg(long)]
    benchmark: PathBuf,

    /// Where to write the comparison table
    #[arg(long, default_value = "comparison.csv")]
    output: PathBuf,

    /// Output format: csv, json or pretty-json
    #[arg(long, default_value = "csv")]
    format: String,

    /// Minimum traded volume for a stock to enter the ranking
    #[arg(long, default_value_t = 1_000_000.0)]
    liquidity_threshold: f64,

    /// Number of top-ranked stocks held each period
    #[arg(long, default_value_t = 10)]
    portfolio_size: u32,
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let format: ExportFormat = cli.format.parse()?;

    let companies = load_company_panel(&cli.companies)?;
    let benchmark = load_benchmark_series(&cli.benchmark)?;

    let backtest = MagicFormulaBacktest::with_config(ScreenConfig {
        liquidity_threshold: cli.liquidity_threshold,
        portfolio_size: cli.portfolio_size,
    });
    let table = backtest.run(companies, benchmark)?;

    table.export_to_file(&cli.output, format)?;
    println!("wrote {} rows to {}", table.rows.len(), cli.output.display());

    if let Some(summary) = BacktestSummary::from_table(&table) {
        println!("{summary}");
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
