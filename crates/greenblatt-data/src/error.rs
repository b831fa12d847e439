//! Error types for data loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading input files.
#[derive(Debug, Error)]
pub enum DataError {
    /// Input file does not exist
    #[error("data file not found: {0}")]
    FileNotFound(PathBuf),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Parsed file contained no data rows
    #[error("no data rows in {0}")]
    Empty(String),

    /// Polars error
    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
