//! Narrow input selection: filter an explicit path list down to component sources.

use std::path::{Path, PathBuf};

use scaffold_core::config::ScanConfig;
use scaffold_core::FxHashSet;

/// Decides whether a path is a candidate component source.
///
/// A candidate has one of the configured extensions and is not a test:
/// no path component is a test directory and the file name carries no test marker.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    extensions: Vec<String>,
    test_dir_names: Vec<String>,
    test_file_markers: Vec<String>,
}

impl CandidateFilter {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            extensions: config.effective_extensions(),
            test_dir_names: config.effective_test_dir_names(),
            test_file_markers: config.effective_test_file_markers(),
        }
    }

    /// `root` is stripped before inspecting directory names, so a project
    /// that itself lives under a `test/` directory is not excluded wholesale.
    pub fn accepts(&self, path: &Path, root: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if !self.extensions.iter().any(|e| e == ext) {
            return false;
        }
        !self.is_test_path(path.strip_prefix(root).unwrap_or(path))
    }

    /// Whether the path looks like a test by directory or file-name convention.
    pub fn is_test_path(&self, path: &Path) -> bool {
        let in_test_dir = path.parent().is_some_and(|parent| {
            parent.components().any(|c| {
                c.as_os_str()
                    .to_str()
                    .is_some_and(|name| self.test_dir_names.iter().any(|d| d == name))
            })
        });
        if in_test_dir {
            return true;
        }
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.test_file_markers
            .iter()
            .any(|marker| file_name.contains(marker.as_str()))
    }
}

/// Filter an explicit list of paths (CLI arguments, changed files) to candidates.
///
/// Relative paths are resolved against `root`. Order is preserved and
/// duplicates are dropped. Paths that do not exist are kept so the batch
/// can report them as unreadable rather than silently ignoring them.
pub fn select_candidates(paths: &[PathBuf], root: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    let filter = CandidateFilter::from_config(config);
    let mut seen = FxHashSet::default();
    let mut selected = Vec::new();

    for path in paths {
        let resolved = if path.is_absolute() {
            path.clone()
        } else {
            root.join(path)
        };
        if !filter.accepts(&resolved, root) {
            tracing::debug!(path = %resolved.display(), "not a candidate component source");
            continue;
        }
        if seen.insert(resolved.clone()) {
            selected.push(resolved);
        }
    }

    selected
}
