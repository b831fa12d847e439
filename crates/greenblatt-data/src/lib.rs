#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/greenblatt/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod loader;

pub use error::{DataError, Result};
pub use loader::{
    load_benchmark_series, load_company_panel, read_benchmark_series, read_company_panel,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
