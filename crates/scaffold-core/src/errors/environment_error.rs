//! Toolchain initialization errors. Fatal for the whole batch.

use super::error_code::{self, ScaffoldErrorCode};

/// The parsing toolchain itself could not be initialized.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("Grammar for {dialect} could not be loaded: {message}")]
    GrammarUnavailable { dialect: String, message: String },

    #[error("Project root {path} is not accessible: {message}")]
    RootUnavailable { path: String, message: String },
}

impl ScaffoldErrorCode for EnvironmentError {
    fn error_code(&self) -> &'static str {
        error_code::ENVIRONMENT_UNAVAILABLE
    }
}
