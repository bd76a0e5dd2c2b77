//! External test runner errors.

use super::error_code::{self, ScaffoldErrorCode};

/// The external test runner could not be spawned or did not exit cleanly.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Test runner command is empty")]
    EmptyCommand,

    #[error("Failed to spawn test runner '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Test runner '{command}' exited with status {code}")]
    NonZeroExit { command: String, code: i32 },

    #[error("Test runner '{command}' timed out after {seconds}s")]
    TimedOut { command: String, seconds: u64 },
}

impl ScaffoldErrorCode for RunnerError {
    fn error_code(&self) -> &'static str {
        error_code::RUNNER_INVOCATION_FAILED
    }
}
