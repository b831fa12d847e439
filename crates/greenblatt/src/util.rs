//! Column extraction helpers shared by the aggregation stages.

use crate::error::{BacktestError, Result};
use chrono::{Duration, NaiveDate};
use polars::prelude::*;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

/// Days since the Unix epoch for a calendar date.
pub(crate) fn days_from_epoch(date: NaiveDate) -> i32 {
    (date - epoch()).num_days() as i32
}

/// Extract a `Date` column as chrono dates. Null dates are rejected.
pub(crate) fn date_values(df: &DataFrame, name: &str) -> Result<Vec<NaiveDate>> {
    let days = df.column(name)?.cast(&DataType::Int32)?;
    days.i32()?
        .into_iter()
        .map(|d| {
            d.map(|d| epoch() + Duration::days(i64::from(d)))
                .ok_or_else(|| BacktestError::NullValue(name.to_string()))
        })
        .collect()
}

/// Extract a float column, keeping nulls as `None`.
pub(crate) fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let values = df.column(name)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}

/// Build a `Date`-typed series from chrono dates.
pub(crate) fn date_series(name: &str, dates: &[NaiveDate]) -> Result<Series> {
    let days: Vec<i32> = dates.iter().map(|d| days_from_epoch(*d)).collect();
    Ok(Series::new(name.into(), days).cast(&DataType::Date)?)
}
