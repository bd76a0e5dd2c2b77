//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Extensions of markup-capable component sources scanned by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["tsx", "jsx", "js"];

/// Directory names whose contents are treated as tests.
pub const DEFAULT_TEST_DIR_NAMES: &[&str] = &["__tests__", "__mocks__", "test", "tests"];

/// File-name fragments that identify tests and other non-component files.
pub const DEFAULT_TEST_FILE_MARKERS: &[&str] = &[".test.", ".spec.", ".stories.", ".d.ts"];

/// Configuration for input file selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Default: 1MB (1_048_576).
    pub max_file_size: Option<u64>,
    /// Include glob patterns. If non-empty, only matching paths are scanned.
    /// Patterns use gitignore syntax (e.g., "src/**").
    pub include: Vec<String>,
    /// Additional ignore patterns beyond .gitignore/.scaffoldignore.
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Candidate extensions. Default: tsx, jsx, js.
    pub extensions: Vec<String>,
    /// Directory names that hold tests. Default: __tests__, __mocks__, test, tests.
    pub test_dir_names: Vec<String>,
    /// File-name fragments marking tests. Default: .test., .spec., .stories., .d.ts.
    pub test_file_markers: Vec<String>,
}

impl ScanConfig {
    /// Returns the effective max file size, defaulting to 1MB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(1_048_576)
    }

    /// Returns whether symlinks are followed, defaulting to false.
    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    /// Returns the effective candidate extensions.
    pub fn effective_extensions(&self) -> Vec<String> {
        or_defaults(&self.extensions, DEFAULT_EXTENSIONS)
    }

    /// Returns the effective test directory names.
    pub fn effective_test_dir_names(&self) -> Vec<String> {
        or_defaults(&self.test_dir_names, DEFAULT_TEST_DIR_NAMES)
    }

    /// Returns the effective test file markers.
    pub fn effective_test_file_markers(&self) -> Vec<String> {
        or_defaults(&self.test_file_markers, DEFAULT_TEST_FILE_MARKERS)
    }
}

fn or_defaults(configured: &[String], defaults: &[&str]) -> Vec<String> {
    if configured.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        configured.to_vec()
    }
}
