//! Magic Formula stock screen.
//!
//! Turns the raw company panel into the per-period selection of top-ranked
//! names. Each period's ranking snapshot is paired with the return realized
//! over the *following* period, so the screen never trades on information
//! it would not have had at selection time.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::xsection::rank_xsection;

/// Columns the screen requires on the company panel.
pub const COMPANY_COLUMNS: &[&str] = &[
    "ticker",
    "date",
    "adjusted_close",
    "traded_volume",
    "ebit_ev",
    "roic",
];

/// Configuration for the Magic Formula screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Minimum traded volume for a row to enter the ranking (default: 1,000,000)
    pub liquidity_threshold: f64,
    /// Number of top-ranked names held each period (default: 10)
    pub portfolio_size: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            liquidity_threshold: 1_000_000.0,
            portfolio_size: 10,
        }
    }
}

/// MagicFormulaScreen ranks each period's universe by ebit/ev and ROIC and
/// keeps the names with the best combined rank.
#[derive(Debug)]
pub struct MagicFormulaScreen {
    config: ScreenConfig,
}

impl MagicFormulaScreen {
    /// Create a screen with the given configuration.
    pub const fn with_config(config: ScreenConfig) -> Self {
        Self { config }
    }

    /// Screen configuration.
    pub const fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Columns the input panel must provide.
    pub const fn required_columns(&self) -> &[&str] {
        COMPANY_COLUMNS
    }

    /// Run the full screen: forward returns, liquidity filter, factor
    /// ranking, selection. The stage order is fixed; in particular the
    /// liquidity filter runs before ranking so illiquid names never enter
    /// a period's rank denominators.
    pub fn select(&self, panel: LazyFrame) -> Result<LazyFrame> {
        let panel = compute_forward_returns(panel);
        let panel = filter_liquidity(panel, self.config.liquidity_threshold);
        let panel = rank_factors(panel);
        Ok(combine_and_select(panel, self.config.portfolio_size))
    }
}

impl Default for MagicFormulaScreen {
    fn default() -> Self {
        Self::with_config(ScreenConfig::default())
    }
}

/// Attach to each row the close-to-close return realized over the next
/// period for the same ticker.
///
/// Equivalent to a period-over-period percentage change shifted one period
/// earlier within the ticker group. The last observation of each ticker
/// (and any ticker with a single observation) gets a null forward return.
pub fn compute_forward_returns(panel: LazyFrame) -> LazyFrame {
    panel
        .sort(["ticker", "date"], Default::default())
        .with_columns([(col("adjusted_close").shift(lit(-1)) / col("adjusted_close")
            - lit(1.0))
        .over([col("ticker")])
        .alias("forward_return")])
}

/// Keep rows whose traded volume strictly exceeds `threshold`.
pub fn filter_liquidity(panel: LazyFrame, threshold: f64) -> LazyFrame {
    panel.filter(col("traded_volume").gt(lit(threshold)))
}

/// Per-period fractional ranks of both factors, best (highest) value first.
///
/// Rows missing a factor value get a null rank for that factor and fall out
/// of selection for the period.
pub fn rank_factors(panel: LazyFrame) -> LazyFrame {
    panel.with_columns([
        rank_xsection("ebit_ev", "date", true).alias("rank_ebit_ev"),
        rank_xsection("roic", "date", true).alias("rank_roic"),
    ])
}

/// Sum the two factor ranks, re-rank the sum within each period (ascending,
/// smallest sum = rank 1), and keep rows with `final_rank <= portfolio_size`.
///
/// Periods with fewer candidates than `portfolio_size` keep all candidates.
pub fn combine_and_select(panel: LazyFrame, portfolio_size: u32) -> LazyFrame {
    panel
        .with_columns([(col("rank_ebit_ev") + col("rank_roic")).alias("combined_rank")])
        .with_columns([rank_xsection("combined_rank", "date", false).alias("final_rank")])
        .filter(col("final_rank").lt_eq(lit(f64::from(portfolio_size))))
}
