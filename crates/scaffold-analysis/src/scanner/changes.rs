//! git2 integration: list the working-tree files changed since HEAD.
//!
//! The result is an opaque path list; it goes through the same
//! candidate filter as any other explicit selection.

use std::path::{Path, PathBuf};

/// Paths (absolute, under the repository workdir) that are new, modified,
/// renamed, or type-changed in the index or the working tree. Deleted files
/// are excluded since there is nothing left to analyze.
pub fn changed_files(repo_path: &Path) -> Result<Vec<PathBuf>, git2::Error> {
    let repo = git2::Repository::discover(repo_path)?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| git2::Error::from_str("repository has no working directory"))?
        .to_path_buf();

    let mut options = git2::StatusOptions::new();
    options
        .include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false)
        .renames_head_to_index(true);

    let statuses = repo.statuses(Some(&mut options))?;
    let wanted = git2::Status::INDEX_NEW
        | git2::Status::INDEX_MODIFIED
        | git2::Status::INDEX_RENAMED
        | git2::Status::INDEX_TYPECHANGE
        | git2::Status::WT_NEW
        | git2::Status::WT_MODIFIED
        | git2::Status::WT_RENAMED
        | git2::Status::WT_TYPECHANGE;

    let mut files: Vec<PathBuf> = statuses
        .iter()
        .filter(|entry| entry.status().intersects(wanted))
        .filter(|entry| !entry.status().intersects(git2::Status::WT_DELETED))
        .filter_map(|entry| entry.path().map(|p| workdir.join(p)))
        .collect();

    files.sort();
    files.dedup();
    tracing::debug!(count = files.len(), "changed files from git status");
    Ok(files)
}
