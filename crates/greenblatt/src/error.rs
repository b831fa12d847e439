//! Error types for the backtest engine.

use thiserror::Error;

/// Result type for backtest operations.
pub type Result<T> = std::result::Result<T, BacktestError>;

/// Errors that can occur while running the backtest pipeline.
///
/// These are structural/data-quality errors raised at the point of
/// detection; the engine never substitutes partial results for them.
#[derive(Debug, Error)]
pub enum BacktestError {
    /// A required column is absent from an input frame.
    #[error("missing required column: {0}")]
    MissingInput(String),

    /// A column that must be fully populated contains a null.
    #[error("null value in required column: {0}")]
    NullValue(String),

    /// No security passed the liquidity and ranking filters in any period.
    #[error("no securities passed the liquidity and ranking filters")]
    EmptySelection,

    /// A series is too short for return computation.
    #[error("insufficient history for {series}: {periods} period(s), at least 2 required")]
    InsufficientHistory {
        /// Which series lacked history ("portfolio" or "benchmark").
        series: String,
        /// Number of periods actually present.
        periods: usize,
    },

    /// Portfolio and benchmark cumulative series do not cover the same periods.
    #[error("series alignment mismatch: {0}")]
    AlignmentMismatch(String),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
