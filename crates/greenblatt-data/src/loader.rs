//! CSV readers for the company panel and the benchmark series.
//!
//! Rows are deserialized with serde, then assembled into DataFrames with a
//! `Date`-typed date column (epoch-day i32 cast), so the core receives the
//! exact schema it validates against.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;
use serde::Deserialize;

use crate::error::{DataError, Result};

#[derive(Debug, Deserialize)]
struct CompanyRow {
    ticker: String,
    date: NaiveDate,
    adjusted_close: f64,
    traded_volume: f64,
    ebit_ev: Option<f64>,
    roic: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct BenchmarkRow {
    date: NaiveDate,
    close: f64,
}

fn date_series(name: &str, dates: &[NaiveDate]) -> Result<Series> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let days: Vec<i32> = dates
        .iter()
        .map(|d| (*d - epoch).num_days() as i32)
        .collect();
    Ok(Series::new(name.into(), days).cast(&DataType::Date)?)
}

/// Read the company panel from any reader.
pub fn read_company_panel<R: Read>(reader: R) -> Result<DataFrame> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let rows = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<CompanyRow>, _>>()?;
    if rows.is_empty() {
        return Err(DataError::Empty("company panel".to_string()));
    }

    let tickers: Vec<&str> = rows.iter().map(|r| r.ticker.as_str()).collect();
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    let closes: Vec<f64> = rows.iter().map(|r| r.adjusted_close).collect();
    let volumes: Vec<f64> = rows.iter().map(|r| r.traded_volume).collect();
    let ebit_ev: Vec<Option<f64>> = rows.iter().map(|r| r.ebit_ev).collect();
    let roic: Vec<Option<f64>> = rows.iter().map(|r| r.roic).collect();

    Ok(DataFrame::new(vec![
        Series::new("ticker".into(), tickers).into(),
        date_series("date", &dates)?.into(),
        Series::new("adjusted_close".into(), closes).into(),
        Series::new("traded_volume".into(), volumes).into(),
        Series::new("ebit_ev".into(), ebit_ev).into(),
        Series::new("roic".into(), roic).into(),
    ])?)
}

/// Read the benchmark price series from any reader.
pub fn read_benchmark_series<R: Read>(reader: R) -> Result<DataFrame> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let rows = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<BenchmarkRow>, _>>()?;
    if rows.is_empty() {
        return Err(DataError::Empty("benchmark series".to_string()));
    }

    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();

    Ok(DataFrame::new(vec![
        date_series("date", &dates)?.into(),
        Series::new("close".into(), closes).into(),
    ])?)
}

/// Load the company panel from a CSV file.
pub fn load_company_panel(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::FileNotFound(path.to_path_buf()));
    }
    read_company_panel(std::fs::File::open(path)?)
}

/// Load the benchmark price series from a CSV file.
pub fn load_benchmark_series(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::FileNotFound(path.to_path_buf()));
    }
    read_benchmark_series(std::fs::File::open(path)?)
}
