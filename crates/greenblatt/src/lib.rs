#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/greenblatt/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod backtest;
pub mod benchmark;
pub mod error;
pub mod returns;
pub mod screen;
pub mod xsection;

mod util;

pub use backtest::MagicFormulaBacktest;
pub use benchmark::{BENCHMARK_COLUMNS, BenchmarkSeries};
pub use error::{BacktestError, Result};
pub use returns::{ComparisonRow, ComparisonTable, CumulativeSeries};
pub use screen::{COMPANY_COLUMNS, MagicFormulaScreen, ScreenConfig};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
