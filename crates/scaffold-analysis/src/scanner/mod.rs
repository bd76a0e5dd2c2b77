//! Input selection: exhaustive directory walk, explicit lists, and git changes.

pub mod changes;
pub mod dialect;
pub mod selection;
pub mod walker;

pub use changes::changed_files;
pub use dialect::Dialect;
pub use selection::{select_candidates, CandidateFilter};
pub use walker::walk_directory;
