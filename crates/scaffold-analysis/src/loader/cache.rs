//! Parse cache: Moka in-memory, keyed by (content_hash, dialect).
//! Identical content parsed as different dialects produces separate entries.

use moka::sync::Cache;
use tree_sitter::Tree;

use crate::scanner::Dialect;

type CacheKey = (u64, Dialect);

/// A batch rarely touches more than a few thousand modules.
pub const DEFAULT_CACHE_CAPACITY: u64 = 4_096;

/// Hash file content with xxh3.
pub fn hash_content(source: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(source)
}

/// In-memory parse cache using Moka (TinyLFU admission).
pub struct ParseCache {
    inner: Cache<CacheKey, Tree>,
}

impl ParseCache {
    /// Create a new parse cache with the given capacity.
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    /// Get a cached tree by content hash and dialect.
    pub fn get(&self, content_hash: u64, dialect: Dialect) -> Option<Tree> {
        self.inner.get(&(content_hash, dialect))
    }

    /// Insert a tree into the cache.
    pub fn insert(&self, content_hash: u64, dialect: Dialect, tree: Tree) {
        self.inner.insert((content_hash, dialect), tree);
    }

    /// Returns the number of entries in the cache.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
