//! End-to-end backtest orchestration.

use polars::prelude::*;

use crate::benchmark::{BENCHMARK_COLUMNS, BenchmarkSeries};
use crate::error::{BacktestError, Result};
use crate::returns::{
    ComparisonTable, align_with_benchmark, compound, period_return_vectors,
    portfolio_period_returns, temporal_shift,
};
use crate::screen::{COMPANY_COLUMNS, MagicFormulaScreen, ScreenConfig};

/// Runs the full Magic Formula backtest over a company panel and a
/// benchmark price series.
///
/// The stages execute in fixed dependency order: screen (forward returns →
/// liquidity → ranking → selection), per-period aggregation, compounding,
/// one-period lag, benchmark compounding, validated alignment. Each stage
/// is a pure transformation of the previous stage's output, so re-running
/// on the same inputs reproduces the same table.
#[derive(Debug, Default)]
pub struct MagicFormulaBacktest {
    screen: MagicFormulaScreen,
}

impl MagicFormulaBacktest {
    /// Create a backtest with the given screen configuration.
    pub const fn with_config(config: ScreenConfig) -> Self {
        Self {
            screen: MagicFormulaScreen::with_config(config),
        }
    }

    /// Screen configuration.
    pub const fn config(&self) -> &ScreenConfig {
        self.screen.config()
    }

    /// Run the backtest and produce the comparison table.
    pub fn run(&self, companies: DataFrame, benchmark: DataFrame) -> Result<ComparisonTable> {
        validate_columns(&companies, COMPANY_COLUMNS)?;
        validate_columns(&benchmark, BENCHMARK_COLUMNS)?;

        let selected = self.screen.select(companies.lazy())?;
        let per_period = portfolio_period_returns(selected)?;
        let (dates, means) = period_return_vectors(&per_period)?;
        let cumulative = compound(&means);
        let portfolio = temporal_shift(&dates, &cumulative)?;

        let benchmark = BenchmarkSeries::from_dataframe(&benchmark)?.cumulative_returns()?;
        align_with_benchmark(&portfolio, &benchmark)
    }
}

fn validate_columns(df: &DataFrame, required: &[&str]) -> Result<()> {
    for column in required {
        if df.column(column).is_err() {
            return Err(BacktestError::MissingInput((*column).to_string()));
        }
    }
    Ok(())
}
