//! Human-readable backtest summary.

use chrono::NaiveDate;
use greenblatt::ComparisonTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline figures for a completed backtest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestSummary {
    /// First date of the comparison table.
    pub period_start: NaiveDate,

    /// Last date of the comparison table.
    pub period_end: NaiveDate,

    /// Number of aligned periods.
    pub periods: usize,

    /// Strategy cumulative return at the final period.
    pub strategy_total_return: f64,

    /// Benchmark cumulative return at the final period.
    pub benchmark_total_return: f64,

    /// Strategy total return minus benchmark total return.
    pub excess_return: f64,
}

impl BacktestSummary {
    /// Summarize a non-empty comparison table. Returns `None` when the
    /// table holds no rows.
    pub fn from_table(table: &ComparisonTable) -> Option<Self> {
        let first = table.rows.first()?;
        let last = table.rows.last()?;
        Some(Self {
            period_start: first.date,
            period_end: last.date,
            periods: table.rows.len(),
            strategy_total_return: last.strategy_cumulative_return,
            benchmark_total_return: last.benchmark_cumulative_return,
            excess_return: last.strategy_cumulative_return - last.benchmark_cumulative_return,
        })
    }
}

impl fmt::Display for BacktestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Magic Formula backtest: {} to {} ({} periods)",
            self.period_start, self.period_end, self.periods
        )?;
        writeln!(
            f,
            "  strategy:  {:>8.2}%",
            self.strategy_total_return * 100.0
        )?;
        writeln!(
            f,
            "  benchmark: {:>8.2}%",
            self.benchmark_total_return * 100.0
        )?;
        write!(f, "  excess:    {:>8.2}%", self.excess_return * 100.0)
    }
}
