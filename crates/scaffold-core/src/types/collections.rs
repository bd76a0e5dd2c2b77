//! Fast hash collections and small inline vectors.

pub use rustc_hash::{FxHashMap, FxHashSet};

/// Prop-name lists are almost always one or two entries long.
pub type PropNames = smallvec::SmallVec<[String; 2]>;
