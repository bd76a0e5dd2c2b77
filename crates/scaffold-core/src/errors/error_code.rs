//! ScaffoldErrorCode trait for structured reporting.

/// Every error enum provides a stable code string so batch reports
/// (human and JSON) can be grepped and compared across runs.
pub trait ScaffoldErrorCode {
    /// Returns the error code string (e.g., "SOURCE_UNREADABLE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SOURCE_UNREADABLE: &str = "SOURCE_UNREADABLE";
pub const ENVIRONMENT_UNAVAILABLE: &str = "ENVIRONMENT_UNAVAILABLE";
pub const RUNNER_INVOCATION_FAILED: &str = "RUNNER_INVOCATION_FAILED";
pub const COVERAGE_UNREADABLE: &str = "COVERAGE_UNREADABLE";
pub const WRITE_ERROR: &str = "WRITE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
