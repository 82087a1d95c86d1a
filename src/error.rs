//! Error types for the batch updater.
//!
//! Only problems that make the whole run impossible are errors: a config
//! file that cannot be loaded, or a CSV file whose shape is wrong. Per-row
//! request failures are `Outcome` values, not errors, and row skips are
//! warnings, so neither ever aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fatal, run-level failures.
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Top-level error for the two entry points.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    CsvFormat(#[from] CsvFormatError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Failure to produce a usable configuration. Always fatal, always before
/// any request is sent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: config::ConfigError,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: config::ConfigError,
    },
}

/// Structural problem with the input CSV. Always fatal: a file we cannot
/// map columns for (or decode records from) is corrupt input, not a row to
/// skip.
#[derive(Debug, Error)]
pub enum CsvFormatError {
    #[error("Failed to open CSV file {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("Required column '{name}' not found in CSV header")]
    MissingColumn { name: String },

    #[error("Failed to read CSV record at line {line}: {source}")]
    Record { line: u64, source: csv::Error },
}
