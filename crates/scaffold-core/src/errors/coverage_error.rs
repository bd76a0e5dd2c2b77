//! Coverage summary errors.

use std::path::PathBuf;

use super::error_code::{self, ScaffoldErrorCode};

/// The runner succeeded but no usable line-coverage figure could be read.
#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    #[error("Coverage summary not found at {path}")]
    SummaryMissing { path: PathBuf },

    #[error("Coverage summary {path} is malformed: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Coverage summary has no entry for {source_file}")]
    NoEntry { source_file: PathBuf },

    #[error("Line coverage for {source_file} is not a number: {value}")]
    NotANumber { source_file: PathBuf, value: String },

    #[error("Failed to clear stale coverage summary {path}: {message}")]
    Reset { path: PathBuf, message: String },
}

impl ScaffoldErrorCode for CoverageError {
    fn error_code(&self) -> &'static str {
        error_code::COVERAGE_UNREADABLE
    }
}
