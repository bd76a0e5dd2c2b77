//! Source loading errors. All of them mean "this one file is unreadable".

use std::path::PathBuf;

use super::error_code::{self, ScaffoldErrorCode};

/// Errors that can occur while loading and parsing one source file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Source file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Unsupported source extension '{extension}' for {path}")]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax errors in {path}: {error_count} error node(s), first at line {first_error_line}")]
    ParseFailed {
        path: PathBuf,
        error_count: u32,
        first_error_line: usize,
    },
}

impl LoadError {
    /// The file the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path }
            | Self::UnsupportedExtension { path, .. }
            | Self::Unreadable { path, .. }
            | Self::ParseFailed { path, .. } => path,
        }
    }
}

impl ScaffoldErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        error_code::SOURCE_UNREADABLE
    }
}
