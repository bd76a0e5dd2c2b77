//! Parallel file walker using the `ignore` crate's `WalkParallel`.
//!
//! Supports `.scaffoldignore` (gitignore syntax, hierarchical) and the default ignore patterns.
//! Only discovery runs in parallel; the returned list is sorted so the batch
//! processes files in a deterministic order.

use std::path::{Path, PathBuf};

use crossbeam_channel as channel;
use scaffold_core::config::ScanConfig;

use super::selection::CandidateFilter;

/// Directories never worth descending into.
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".next",
    ".nuxt",
    ".cache",
    "out",
    "storybook-static",
    "target",
    "vendor",
];

/// Walk a directory tree, returning every candidate component source under it.
///
/// Respects `.gitignore`, `.scaffoldignore`, and [`DEFAULT_IGNORES`].
/// Returns files sorted by path for deterministic output.
pub fn walk_directory(root: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    let (tx, rx) = channel::unbounded();
    let filter = CandidateFilter::from_config(config);

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .add_custom_ignore_filename(".scaffoldignore")
        .max_filesize(Some(config.effective_max_file_size()))
        .follow_links(config.effective_follow_symlinks());

    // Include patterns act as a whitelist, ignore patterns as a negated blacklist.
    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in &config.include {
        if let Err(e) = overrides.add(pattern) {
            tracing::warn!(pattern = %pattern, error = %e, "invalid include pattern");
        }
    }
    for pattern in DEFAULT_IGNORES {
        for glob in [format!("!{pattern}/**"), format!("!{pattern}")] {
            if let Err(e) = overrides.add(&glob) {
                tracing::warn!(pattern = %glob, error = %e, "invalid default ignore pattern");
            }
        }
    }
    for pattern in &config.extra_ignore {
        if let Err(e) = overrides.add(&format!("!{}", pattern)) {
            tracing::warn!(pattern = %pattern, error = %e, "invalid ignore pattern");
        }
    }
    match overrides.build() {
        Ok(built) => {
            builder.overrides(built);
        }
        Err(e) => tracing::warn!(error = %e, "override patterns failed to build; walking without them"),
    }

    let walker = builder.build_parallel();

    walker.run(|| {
        let tx = tx.clone();
        let filter = &filter;
        Box::new(move |entry| {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => return ignore::WalkState::Continue,
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return ignore::WalkState::Continue;
            }

            let path = entry.path();
            if filter.accepts(path, root) {
                let _ = tx.send(path.to_path_buf());
            }

            ignore::WalkState::Continue
        })
    });

    drop(tx);
    let mut files: Vec<PathBuf> = rx.into_iter().collect();
    files.sort();
    tracing::debug!(root = %root.display(), count = files.len(), "walk complete");
    files
}
