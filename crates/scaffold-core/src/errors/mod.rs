//! Error types for every scaffold subsystem.
//! One enum per concern, all implementing [`ScaffoldErrorCode`].

pub mod config_error;
pub mod coverage_error;
pub mod environment_error;
pub mod error_code;
pub mod load_error;
pub mod runner_error;
pub mod write_error;

pub use config_error::ConfigError;
pub use coverage_error::CoverageError;
pub use environment_error::EnvironmentError;
pub use error_code::ScaffoldErrorCode;
pub use load_error::LoadError;
pub use runner_error::RunnerError;
pub use write_error::WriteError;
