//! Reading line coverage from an Istanbul `json-summary` report.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use scaffold_core::config::CoverageConfig;
use scaffold_core::errors::CoverageError;
use serde::Deserialize;

/// Where the feedback loop reads coverage from.
pub trait CoverageSource {
    /// Remove any stale report before a run.
    fn reset(&self) -> Result<(), CoverageError>;

    /// Line-coverage percentage for one source file.
    fn line_coverage(&self, source_file: &Path) -> Result<f64, CoverageError>;
}

#[derive(Debug, Deserialize)]
struct FileSummary {
    lines: Metric,
}

#[derive(Debug, Deserialize)]
struct Metric {
    pct: serde_json::Value,
}

/// Reads `coverage-summary.json`, whose keys are file paths (absolute, or
/// relative to the project root) plus a `total` entry.
#[derive(Debug, Clone)]
pub struct JsonSummaryReader {
    root: PathBuf,
    summary_path: PathBuf,
}

impl JsonSummaryReader {
    pub fn new(root: impl Into<PathBuf>, summary_path: impl AsRef<Path>) -> Self {
        let root = root.into();
        let summary_path = root.join(summary_path);
        Self { root, summary_path }
    }

    pub fn from_config(config: &CoverageConfig, root: &Path) -> Self {
        Self::new(root, config.effective_summary_path())
    }

    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }

    fn matches(&self, key: &str, source: &Path) -> bool {
        let key_path = Path::new(key);
        let absolute_key = if key_path.is_absolute() {
            key_path.to_path_buf()
        } else {
            self.root.join(key_path)
        };
        if absolute_key == source || canonical(&absolute_key) == canonical(source) {
            return true;
        }
        source
            .strip_prefix(&self.root)
            .is_ok_and(|relative| !relative.as_os_str().is_empty() && key_path.ends_with(relative))
    }
}

impl CoverageSource for JsonSummaryReader {
    fn reset(&self) -> Result<(), CoverageError> {
        match fs::remove_file(&self.summary_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoverageError::Reset {
                path: self.summary_path.clone(),
                message: e.to_string(),
            }),
        }
    }

    fn line_coverage(&self, source_file: &Path) -> Result<f64, CoverageError> {
        let text = fs::read_to_string(&self.summary_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoverageError::SummaryMissing {
                    path: self.summary_path.clone(),
                }
            } else {
                CoverageError::Malformed {
                    path: self.summary_path.clone(),
                    message: e.to_string(),
                }
            }
        })?;
        let entries: BTreeMap<String, FileSummary> =
            serde_json::from_str(&text).map_err(|e| CoverageError::Malformed {
                path: self.summary_path.clone(),
                message: e.to_string(),
            })?;

        let source = if source_file.is_absolute() {
            source_file.to_path_buf()
        } else {
            self.root.join(source_file)
        };
        let entry = entries
            .iter()
            .filter(|(key, _)| key.as_str() != "total")
            .find(|(key, _)| self.matches(key, &source))
            .map(|(_, summary)| summary)
            .ok_or_else(|| CoverageError::NoEntry {
                source_file: source_file.to_path_buf(),
            })?;

        entry
            .lines
            .pct
            .as_f64()
            .ok_or_else(|| CoverageError::NotANumber {
                source_file: source_file.to_path_buf(),
                value: entry.lines.pct.to_string(),
            })
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
