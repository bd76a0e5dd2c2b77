//! Coverage feedback loop: run the pass 1 test, and regenerate with
//! pass 2 when line coverage falls below the threshold.
//!
//! The loop runs at most once per file. Runner and coverage failures are
//! recorded in the report and never retried.

use std::path::Path;

use scaffold_core::config::CoverageConfig;
use scaffold_core::errors::{CoverageError, RunnerError, WriteError};
use scaffold_core::ScaffoldErrorCode;
use serde::Serialize;

use super::runner::{CommandRunner, TestRunner};
use super::summary::{CoverageSource, JsonSummaryReader};
use crate::placement::PlacementPolicy;

/// Where the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    /// The pass 1 file is final.
    Initial,
    /// The file was regenerated with pass 2.
    Refined,
}

/// The step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Runner,
    Coverage,
    Write,
}

/// A recorded, non-fatal loop failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackFailure {
    pub stage: FailureStage,
    pub code: &'static str,
    pub message: String,
}

impl From<RunnerError> for FeedbackFailure {
    fn from(e: RunnerError) -> Self {
        Self {
            stage: FailureStage::Runner,
            code: e.error_code(),
            message: e.to_string(),
        }
    }
}

impl From<CoverageError> for FeedbackFailure {
    fn from(e: CoverageError) -> Self {
        Self {
            stage: FailureStage::Coverage,
            code: e.error_code(),
            message: e.to_string(),
        }
    }
}

impl From<WriteError> for FeedbackFailure {
    fn from(e: WriteError) -> Self {
        Self {
            stage: FailureStage::Write,
            code: e.error_code(),
            message: e.to_string(),
        }
    }
}

/// Outcome of one loop run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackReport {
    pub state: LoopState,
    /// Line coverage of the pass 1 test, when it could be measured.
    pub initial_coverage: Option<f64>,
    /// Line coverage after regeneration, when measured.
    pub refined_coverage: Option<f64>,
    pub failure: Option<FeedbackFailure>,
}

impl FeedbackReport {
    fn initial(initial_coverage: Option<f64>, failure: Option<FeedbackFailure>) -> Self {
        Self {
            state: LoopState::Initial,
            initial_coverage,
            refined_coverage: None,
            failure,
        }
    }
}

/// Drives the runner and coverage source for one file at a time.
pub struct FeedbackLoop {
    runner: Box<dyn TestRunner>,
    coverage: Box<dyn CoverageSource>,
    threshold: f64,
}

impl FeedbackLoop {
    pub fn new(
        runner: Box<dyn TestRunner>,
        coverage: Box<dyn CoverageSource>,
        threshold: f64,
    ) -> Self {
        Self {
            runner,
            coverage,
            threshold,
        }
    }

    /// The command runner and json-summary reader described by the config.
    pub fn from_config(config: &CoverageConfig, root: &Path) -> Self {
        Self::new(
            Box::new(CommandRunner::from_config(config, root)),
            Box::new(JsonSummaryReader::from_config(config, root)),
            config.effective_threshold(),
        )
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Run `test_file` and read line coverage for `source_file`.
    pub fn measure(&self, test_file: &Path, source_file: &Path) -> Result<f64, FeedbackFailure> {
        self.coverage.reset()?;
        self.runner.run(test_file, source_file)?;
        Ok(self.coverage.line_coverage(source_file)?)
    }

    /// Run the loop for one written pass 1 file. `refine` produces the
    /// pass 2 content and is only called when coverage is below threshold.
    pub fn run(
        &self,
        source_file: &Path,
        test_file: &Path,
        placement: &PlacementPolicy,
        refine: impl FnOnce() -> String,
    ) -> FeedbackReport {
        let initial = match self.measure(test_file, source_file) {
            Ok(pct) => pct,
            Err(failure) => {
                tracing::warn!(
                    source = %source_file.display(),
                    code = failure.code,
                    "coverage feedback stopped: {}",
                    failure.message
                );
                return FeedbackReport::initial(None, Some(failure));
            }
        };

        if initial >= self.threshold {
            tracing::info!(
                source = %source_file.display(),
                coverage = initial,
                threshold = self.threshold,
                "coverage meets threshold"
            );
            return FeedbackReport::initial(Some(initial), None);
        }

        tracing::info!(
            source = %source_file.display(),
            coverage = initial,
            threshold = self.threshold,
            "coverage below threshold, regenerating"
        );
        if let Err(e) = placement.write(test_file, &refine()) {
            return FeedbackReport::initial(Some(initial), Some(e.into()));
        }

        let (refined_coverage, failure) = match self.measure(test_file, source_file) {
            Ok(pct) => (Some(pct), None),
            Err(failure) => (None, Some(failure)),
        };
        FeedbackReport {
            state: LoopState::Refined,
            initial_coverage: Some(initial),
            refined_coverage,
            failure,
        }
    }
}
