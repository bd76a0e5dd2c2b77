//! Coverage feedback loop configuration.

use serde::{Deserialize, Serialize};

/// Default runner invocation. `{test_file}` and `{source_file}` are substituted per file.
pub const DEFAULT_RUNNER_COMMAND: &[&str] = &[
    "npx",
    "jest",
    "{test_file}",
    "--coverage",
    "--coverageReporters=json-summary",
    "--collectCoverageFrom={source_file}",
    "--watchAll=false",
];

/// Configuration for the coverage-driven second generation pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoverageConfig {
    /// Run the feedback loop after writing pass 1. Default: false.
    pub enabled: Option<bool>,
    /// Line-coverage percentage below which pass 2 is generated. Default: 50.0.
    pub threshold: Option<f64>,
    /// Runner command and arguments.
    pub command: Vec<String>,
    /// Istanbul json-summary location, relative to the project root.
    /// Default: "coverage/coverage-summary.json".
    pub summary_path: Option<String>,
    /// Kill the runner after this many seconds. Default: none (wait forever).
    pub timeout_seconds: Option<u64>,
    /// Let the runner write to this process's stdout/stderr. Default: false.
    pub inherit_output: Option<bool>,
}

impl CoverageConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn effective_threshold(&self) -> f64 {
        self.threshold.unwrap_or(50.0)
    }

    pub fn effective_command(&self) -> Vec<String> {
        if self.command.is_empty() {
            DEFAULT_RUNNER_COMMAND.iter().map(|s| s.to_string()).collect()
        } else {
            self.command.clone()
        }
    }

    pub fn effective_summary_path(&self) -> &str {
        self.summary_path
            .as_deref()
            .unwrap_or("coverage/coverage-summary.json")
    }

    pub fn effective_inherit_output(&self) -> bool {
        self.inherit_output.unwrap_or(false)
    }
}
