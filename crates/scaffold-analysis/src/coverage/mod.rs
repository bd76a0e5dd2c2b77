//! Coverage feedback: runner invocation, summary parsing, and the loop.

pub mod feedback;
pub mod runner;
pub mod summary;

pub use feedback::{FailureStage, FeedbackFailure, FeedbackLoop, FeedbackReport, LoopState};
pub use runner::{CommandRunner, TestRunner};
pub use summary::{CoverageSource, JsonSummaryReader};
