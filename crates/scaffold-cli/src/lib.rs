//! # scaffold-cli
//!
//! `scaffold generate` and `scaffold analyze`.

pub mod analyze;
pub mod cli;
pub mod error;
pub mod generate;
pub mod report;

pub use cli::{run, run_from_env, Cli, Commands};
pub use error::{CliError, Result};
