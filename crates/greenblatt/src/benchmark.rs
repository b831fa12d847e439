//! Benchmark price series and its compounded return path.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::{BacktestError, Result};
use crate::returns::{CumulativeSeries, compound};
use crate::util::{date_values, f64_values};

/// Columns required on the benchmark frame.
pub const BENCHMARK_COLUMNS: &[&str] = &["date", "close"];

/// Ordered benchmark index prices.
#[derive(Debug, Clone)]
pub struct BenchmarkSeries {
    dates: Vec<NaiveDate>,
    closes: Vec<f64>,
}

impl BenchmarkSeries {
    /// Build the series from a `(date, close)` frame, sorted by date.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        for column in BENCHMARK_COLUMNS {
            if df.column(column).is_err() {
                return Err(BacktestError::MissingInput((*column).to_string()));
            }
        }
        let sorted = df
            .clone()
            .lazy()
            .sort(["date"], Default::default())
            .collect()?;
        let dates = date_values(&sorted, "date")?;
        let closes = f64_values(&sorted, "close")?
            .into_iter()
            .map(|c| c.ok_or_else(|| BacktestError::NullValue("close".to_string())))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Self { dates, closes })
    }

    /// Number of price observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Compounded cumulative return path.
    ///
    /// Period returns are close-over-prior-close changes; the first period
    /// has no prior price and is dropped, so the result starts at the
    /// second observation's date. Fewer than two prices is an error.
    pub fn cumulative_returns(&self) -> Result<CumulativeSeries> {
        if self.len() < 2 {
            return Err(BacktestError::InsufficientHistory {
                series: "benchmark".to_string(),
                periods: self.len(),
            });
        }
        let returns: Vec<Option<f64>> = self
            .closes
            .windows(2)
            .map(|w| Some(w[1] / w[0] - 1.0))
            .collect();
        let values = compound(&returns)
            .into_iter()
            .flatten()
            .collect::<Vec<f64>>();
        Ok(CumulativeSeries {
            dates: self.dates[1..].to_vec(),
            values,
        })
    }
}
