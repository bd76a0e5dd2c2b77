//! Source loader: tree-sitter parsing with a shared per-batch context.

pub mod cache;
pub mod context;
pub mod error_tolerant;
pub mod types;

pub use context::{ModuleSource, NoModules, SourceContext};
pub use types::SourceFile;
