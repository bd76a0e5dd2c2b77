//! # scaffold-analysis
//!
//! Engine of the scaffold test generator: selects component sources,
//! parses them with tree-sitter, infers component contracts from the
//! syntax tree, and emits test scaffolding with a coverage feedback loop.

#![allow(clippy::module_inception)]

pub mod analyzer;
pub mod coverage;
pub mod generator;
pub mod loader;
pub mod mocks;
pub mod pipeline;
pub mod placement;
pub mod scanner;
pub mod selector;

pub use analyzer::{analyze, ComponentInfo, PropInfo};
pub use coverage::{FeedbackLoop, FeedbackReport, LoopState};
pub use generator::{Generator, Pass, ScaffoldTarget};
pub use loader::{ModuleSource, NoModules, SourceContext, SourceFile};
pub use pipeline::{Batch, BatchCounts, BatchReport, FileOutcome, FileReport};
pub use placement::{Placement, PlacementPolicy};
pub use selector::{derive_selector, SelectorInfo, SelectorStrategy};
