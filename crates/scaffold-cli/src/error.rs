use thiserror::Error;

use scaffold_core::errors::{ConfigError, EnvironmentError, LoadError};

pub type Result<T> = std::result::Result<T, CliError>;

/// Exit status when the toolchain itself is unusable.
pub const EXIT_ENVIRONMENT: i32 = 2;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("{failed} file(s) failed")]
    BatchFailed { failed: usize },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Environment(_) => EXIT_ENVIRONMENT,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_errors_exit_with_two() {
        let error = CliError::from(EnvironmentError::GrammarUnavailable {
            dialect: "tsx".into(),
            message: "incompatible".into(),
        });
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn other_errors_exit_with_one() {
        assert_eq!(CliError::BatchFailed { failed: 3 }.exit_code(), 1);
        assert_eq!(CliError::invalid("bad").exit_code(), 1);
    }
}
