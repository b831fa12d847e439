//! Portfolio return aggregation and benchmark alignment.
//!
//! Consumes the selected panel produced by the screen, compounds the
//! equal-weighted portfolio returns, lags the result so each row reports
//! the value realized through the prior period, and joins it against the
//! benchmark's own compounded path under an explicit alignment check.

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{BacktestError, Result};
use crate::util::{date_series, date_values, f64_values};

/// A fully defined, date-ascending cumulative return series.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeSeries {
    /// Period dates, ascending, no duplicates.
    pub dates: Vec<NaiveDate>,
    /// Cumulative return at each date, relative to 1.0 at the start.
    pub values: Vec<f64>,
}

/// One period of the strategy-vs-benchmark comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Period date.
    pub date: NaiveDate,
    /// Strategy cumulative return realized through the prior period.
    pub strategy_cumulative_return: f64,
    /// Benchmark cumulative return at this date.
    pub benchmark_cumulative_return: f64,
}

/// The final backtest artifact: one row per aligned period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Rows in ascending date order.
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Render the table as a polars frame for downstream consumers.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<NaiveDate> = self.rows.iter().map(|r| r.date).collect();
        let strategy: Vec<f64> = self
            .rows
            .iter()
            .map(|r| r.strategy_cumulative_return)
            .collect();
        let benchmark: Vec<f64> = self
            .rows
            .iter()
            .map(|r| r.benchmark_cumulative_return)
            .collect();
        Ok(DataFrame::new(vec![
            date_series("date", &dates)?.into(),
            Series::new("strategy_cumulative_return".into(), strategy).into(),
            Series::new("benchmark_cumulative_return".into(), benchmark).into(),
        ])?)
    }
}

/// Equal-weighted mean forward return of the selected names, per period.
///
/// Nulls never count as zeros: a period whose selected rows all lack a
/// forward return yields a null mean, which later drops out of the lagged
/// series rather than polluting the compounded path.
pub fn portfolio_period_returns(selected: LazyFrame) -> Result<DataFrame> {
    let df = selected
        .group_by([col("date")])
        .agg([col("forward_return").mean().alias("portfolio_return")])
        .sort(["date"], Default::default())
        .collect()?;
    if df.height() == 0 {
        return Err(BacktestError::EmptySelection);
    }
    Ok(df)
}

/// Running product of `(1 + r)` minus 1, in input order.
///
/// A missing entry stays missing at its own position while the running
/// product carries across the gap, so later defined entries still compound
/// everything defined before them.
pub fn compound(returns: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut growth = 1.0;
    returns
        .iter()
        .map(|r| {
            r.map(|r| {
                growth *= 1.0 + r;
                growth - 1.0
            })
        })
        .collect()
}

/// Lag the compounded portfolio path by one period.
///
/// The mean return attributed to period T is realized over T+1, so row T+1
/// reports the cumulative value known after T. The first row (and any row
/// whose prior value is undefined) is dropped.
pub fn temporal_shift(
    dates: &[NaiveDate],
    cumulative: &[Option<f64>],
) -> Result<CumulativeSeries> {
    if dates.len() < 2 {
        return Err(BacktestError::InsufficientHistory {
            series: "portfolio".to_string(),
            periods: dates.len(),
        });
    }
    let mut out_dates = Vec::with_capacity(dates.len() - 1);
    let mut out_values = Vec::with_capacity(dates.len() - 1);
    for i in 1..dates.len() {
        if let Some(value) = cumulative[i - 1] {
            out_dates.push(dates[i]);
            out_values.push(value);
        }
    }
    Ok(CumulativeSeries {
        dates: out_dates,
        values: out_values,
    })
}

/// Join the lagged portfolio path against the benchmark path.
///
/// Both series must cover exactly the same periods in the same order.
/// Any length or per-period date discrepancy is fatal; the table is never
/// silently truncated or padded to fit.
pub fn align_with_benchmark(
    portfolio: &CumulativeSeries,
    benchmark: &CumulativeSeries,
) -> Result<ComparisonTable> {
    if portfolio.dates.len() != benchmark.dates.len() {
        return Err(BacktestError::AlignmentMismatch(format!(
            "portfolio has {} periods, benchmark has {}",
            portfolio.dates.len(),
            benchmark.dates.len()
        )));
    }
    for (p, b) in portfolio.dates.iter().zip(&benchmark.dates) {
        if p != b {
            return Err(BacktestError::AlignmentMismatch(format!(
                "portfolio period {p} does not correspond to benchmark period {b}"
            )));
        }
    }
    let rows = portfolio
        .dates
        .iter()
        .zip(&portfolio.values)
        .zip(&benchmark.values)
        .map(|((date, strategy), benchmark)| ComparisonRow {
            date: *date,
            strategy_cumulative_return: *strategy,
            benchmark_cumulative_return: *benchmark,
        })
        .collect();
    Ok(ComparisonTable { rows })
}

/// Pull the per-period dates and mean returns out of the aggregated frame.
pub(crate) fn period_return_vectors(
    df: &DataFrame,
) -> Result<(Vec<NaiveDate>, Vec<Option<f64>>)> {
    let dates = date_values(df, "date")?;
    let means = f64_values(df, "portfolio_return")?;
    Ok((dates, means))
}
