//! File placement policy: where a scaffold goes and whether it may be written.
//!
//! A generated file starts with [`GENERATED_MARKER`]. An existing test file
//! whose first non-blank line lacks the marker is hand-written and is never
//! touched.

use std::fs;
use std::path::{Component, Path, PathBuf};

use scaffold_core::config::GenerationConfig;
use scaffold_core::errors::WriteError;
use serde::Serialize;

/// Prefix of the first line of every generated file.
pub const GENERATED_MARKER: &str = "// @generated by scaffold";

/// The full header line emitted by the generator.
pub const GENERATED_HEADER: &str =
    "// @generated by scaffold. Delete this line to keep manual edits.";

/// What the policy decides for a target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// No file exists yet.
    Create,
    /// A generated file exists and may be replaced.
    Regenerate,
    /// A hand-written file exists and must be left alone.
    Protected,
}

impl Placement {
    pub fn may_write(self) -> bool {
        !matches!(self, Self::Protected)
    }
}

/// Whether content starts with the generated-file marker.
pub fn carries_marker(content: &str) -> bool {
    content
        .lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| line.trim_start().starts_with(GENERATED_MARKER))
}

/// Maps source files to test files and guards manual tests.
#[derive(Debug, Clone)]
pub struct PlacementPolicy {
    test_suffix: String,
    test_directory: Option<PathBuf>,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self::from_config(&GenerationConfig::default())
    }
}

impl PlacementPolicy {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            test_suffix: config.effective_test_suffix().to_string(),
            test_directory: config.test_directory.as_ref().map(PathBuf::from),
        }
    }

    /// `src/Button.tsx` becomes `src/Button.test.tsx`, or
    /// `src/__tests__/Button.test.tsx` with a test directory configured.
    pub fn target_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let file_name = match source.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{stem}.{}.{ext}", self.test_suffix),
            None => format!("{stem}.{}", self.test_suffix),
        };
        let dir = source.parent().unwrap_or_else(|| Path::new(""));
        match &self.test_directory {
            Some(sub) => dir.join(sub).join(file_name),
            None => dir.join(file_name),
        }
    }

    /// Import specifier of the source module as seen from its test file.
    pub fn import_path(&self, source: &Path) -> String {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let depth = self
            .test_directory
            .as_ref()
            .map(|sub| {
                sub.components()
                    .filter(|c| matches!(c, Component::Normal(_)))
                    .count()
            })
            .unwrap_or(0);
        if depth == 0 {
            format!("./{stem}")
        } else {
            format!("{}{stem}", "../".repeat(depth))
        }
    }

    /// Decide what may happen at `target`.
    pub fn check(&self, target: &Path) -> Result<Placement, WriteError> {
        if target.is_dir() {
            return Ok(Placement::Protected);
        }
        let bytes = match fs::read(target) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Placement::Create),
            Err(source) => {
                return Err(WriteError::Io {
                    path: target.to_path_buf(),
                    source,
                })
            }
        };
        // Non-UTF-8 content cannot be ours.
        let placement = match std::str::from_utf8(&bytes) {
            Ok(text) if carries_marker(text) => Placement::Regenerate,
            _ => Placement::Protected,
        };
        Ok(placement)
    }

    /// Write generated content to `target` unless a manual test is there.
    pub fn write(&self, target: &Path, content: &str) -> Result<Placement, WriteError> {
        if !carries_marker(content) {
            return Err(WriteError::MissingMarker {
                path: target.to_path_buf(),
            });
        }
        let placement = self.check(target)?;
        if !placement.may_write() {
            return Err(WriteError::ManualTestPresent {
                path: target.to_path_buf(),
            });
        }
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| WriteError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(target, content).map_err(|source| WriteError::Io {
            path: target.to_path_buf(),
            source,
        })?;
        tracing::debug!(target = %target.display(), ?placement, "wrote scaffold");
        Ok(placement)
    }
}
