//! Output write errors.

use std::path::PathBuf;

use super::error_code::{self, ScaffoldErrorCode};

/// Errors raised by the file placement policy when writing a scaffold.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Refusing to overwrite hand-written test {path}")]
    ManualTestPresent { path: PathBuf },

    #[error("Generated content for {path} lacks the generated-file marker")]
    MissingMarker { path: PathBuf },

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldErrorCode for WriteError {
    fn error_code(&self) -> &'static str {
        error_code::WRITE_ERROR
    }
}
