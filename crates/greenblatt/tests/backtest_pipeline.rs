//! End-to-end pipeline tests over small hand-built panels.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use greenblatt::{BacktestError, MagicFormulaBacktest, MagicFormulaScreen, ScreenConfig};
use polars::prelude::*;

fn date(y: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, 1).unwrap()
}

fn date_series(name: &str, dates: &[NaiveDate]) -> Series {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let days: Vec<i32> = dates.iter().map(|d| (*d - epoch).num_days() as i32).collect();
    Series::new(name.into(), days).cast(&DataType::Date).unwrap()
}

fn company_panel(
    rows: &[(&str, NaiveDate, f64, f64, Option<f64>, Option<f64>)],
) -> DataFrame {
    DataFrame::new(vec![
        Series::new("ticker".into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()).into(),
        date_series("date", &rows.iter().map(|r| r.1).collect::<Vec<_>>()).into(),
        Series::new(
            "adjusted_close".into(),
            rows.iter().map(|r| r.2).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "traded_volume".into(),
            rows.iter().map(|r| r.3).collect::<Vec<_>>(),
        )
        .into(),
        Series::new("ebit_ev".into(), rows.iter().map(|r| r.4).collect::<Vec<_>>()).into(),
        Series::new("roic".into(), rows.iter().map(|r| r.5).collect::<Vec<_>>()).into(),
    ])
    .unwrap()
}

fn benchmark_frame(rows: &[(NaiveDate, f64)]) -> DataFrame {
    DataFrame::new(vec![
        date_series("date", &rows.iter().map(|r| r.0).collect::<Vec<_>>()).into(),
        Series::new("close".into(), rows.iter().map(|r| r.1).collect::<Vec<_>>()).into(),
    ])
    .unwrap()
}

/// Three names over two periods; the top-ranked name returns 5% while the
/// benchmark climbs from 100 to 110. The first emitted row must pair the
/// portfolio's first realized compounded return with the benchmark's 10%.
fn two_period_inputs() -> (DataFrame, DataFrame) {
    let companies = company_panel(&[
        ("AAA", date(2024, 1), 100.0, 2e6, Some(0.30), Some(0.30)),
        ("AAA", date(2024, 2), 105.0, 2e6, Some(0.30), Some(0.30)),
        ("BBB", date(2024, 1), 50.0, 2e6, Some(0.20), Some(0.20)),
        ("BBB", date(2024, 2), 49.0, 2e6, Some(0.20), Some(0.20)),
        ("CCC", date(2024, 1), 10.0, 2e6, Some(0.10), Some(0.10)),
        ("CCC", date(2024, 2), 11.0, 2e6, Some(0.10), Some(0.10)),
    ]);
    let benchmark = benchmark_frame(&[(date(2024, 1), 100.0), (date(2024, 2), 110.0)]);
    (companies, benchmark)
}

#[test]
fn end_to_end_two_periods() {
    let (companies, benchmark) = two_period_inputs();
    let backtest = MagicFormulaBacktest::with_config(ScreenConfig {
        liquidity_threshold: 1_000_000.0,
        portfolio_size: 1,
    });
    let table = backtest.run(companies, benchmark).unwrap();

    assert_eq!(table.rows.len(), 1);
    let row = &table.rows[0];
    assert_eq!(row.date, date(2024, 2));
    assert_relative_eq!(row.strategy_cumulative_return, 0.05, max_relative = 1e-12);
    assert_relative_eq!(row.benchmark_cumulative_return, 0.10, max_relative = 1e-12);
}

#[test]
fn rerun_is_byte_identical() {
    let backtest = MagicFormulaBacktest::with_config(ScreenConfig {
        liquidity_threshold: 1_000_000.0,
        portfolio_size: 1,
    });
    let (companies, benchmark) = two_period_inputs();
    let first = backtest.run(companies.clone(), benchmark.clone()).unwrap();
    let second = backtest.run(companies, benchmark).unwrap();
    assert_eq!(first, second);

    let a = first.to_dataframe().unwrap();
    let b = second.to_dataframe().unwrap();
    assert!(a.equals(&b));
}

#[test]
fn benchmark_length_mismatch_is_fatal() {
    let (companies, _) = two_period_inputs();
    let benchmark = benchmark_frame(&[
        (date(2024, 1), 100.0),
        (date(2024, 2), 110.0),
        (date(2024, 3), 120.0),
    ]);
    let backtest = MagicFormulaBacktest::with_config(ScreenConfig {
        liquidity_threshold: 1_000_000.0,
        portfolio_size: 1,
    });
    let err = backtest.run(companies, benchmark).unwrap_err();
    assert!(matches!(err, BacktestError::AlignmentMismatch(_)));
}

#[test]
fn illiquid_universe_yields_empty_selection() {
    let companies = company_panel(&[
        ("AAA", date(2024, 1), 100.0, 1e5, Some(0.30), Some(0.30)),
        ("AAA", date(2024, 2), 105.0, 1e5, Some(0.30), Some(0.30)),
    ]);
    let benchmark = benchmark_frame(&[(date(2024, 1), 100.0), (date(2024, 2), 110.0)]);
    let err = MagicFormulaBacktest::default()
        .run(companies, benchmark)
        .unwrap_err();
    assert!(matches!(err, BacktestError::EmptySelection));
}

#[test]
fn single_observation_ticker_is_held_but_never_contributes() {
    // ONE appears in one period only, liquid and best-ranked: it makes the
    // selection, but its null forward return stays out of the period mean,
    // so the emitted table is identical with or without it.
    let (baseline_companies, benchmark) = two_period_inputs();
    let mut rows = vec![("ONE", date(2024, 1), 40.0, 3e6, Some(0.90), Some(0.90))];
    rows.extend([
        ("AAA", date(2024, 1), 100.0, 2e6, Some(0.30), Some(0.30)),
        ("AAA", date(2024, 2), 105.0, 2e6, Some(0.30), Some(0.30)),
        ("BBB", date(2024, 1), 50.0, 2e6, Some(0.20), Some(0.20)),
        ("BBB", date(2024, 2), 49.0, 2e6, Some(0.20), Some(0.20)),
        ("CCC", date(2024, 1), 10.0, 2e6, Some(0.10), Some(0.10)),
        ("CCC", date(2024, 2), 11.0, 2e6, Some(0.10), Some(0.10)),
    ]);
    let companies = company_panel(&rows);

    let screen = MagicFormulaScreen::default();
    let selected = screen
        .select(companies.clone().lazy())
        .unwrap()
        .collect()
        .unwrap();
    let one = selected
        .lazy()
        .filter(col("ticker").eq(lit("ONE")))
        .collect()
        .unwrap();
    assert_eq!(one.height(), 1);
    let fwd: Vec<Option<f64>> = one
        .column("forward_return")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(fwd, vec![None]);

    let backtest = MagicFormulaBacktest::default();
    let with_one = backtest.run(companies, benchmark.clone()).unwrap();
    let without_one = backtest.run(baseline_companies, benchmark).unwrap();
    assert_eq!(with_one, without_one);
    assert_relative_eq!(
        with_one.rows[0].strategy_cumulative_return,
        (0.05 - 0.02 + 0.10) / 3.0,
        max_relative = 1e-12
    );
}

#[test]
fn default_portfolio_size_keeps_small_universe() {
    // three candidates, portfolio size 10: every liquid name is held
    let (companies, benchmark) = two_period_inputs();
    let table = MagicFormulaBacktest::default()
        .run(companies, benchmark)
        .unwrap();
    assert_eq!(table.rows.len(), 1);
    // equal-weighted mean of 5%, -2%, 10%
    assert_relative_eq!(
        table.rows[0].strategy_cumulative_return,
        (0.05 - 0.02 + 0.10) / 3.0,
        max_relative = 1e-12
    );
}
