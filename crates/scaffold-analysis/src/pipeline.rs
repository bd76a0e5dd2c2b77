//! Batch pipeline: load, analyze, place, generate, write, and optionally
//! refine, one file at a time.
//!
//! Per-file failures become outcomes in the [`BatchReport`]; only an
//! [`EnvironmentError`] while building the [`Batch`] stops the whole run.

use std::path::{Path, PathBuf};

use scaffold_core::errors::{EnvironmentError, WriteError};
use scaffold_core::{ScaffoldConfig, ScaffoldErrorCode};
use serde::Serialize;

use crate::analyzer::analyze;
use crate::coverage::{FeedbackLoop, FeedbackReport, LoopState};
use crate::generator::{Generator, Pass, ScaffoldTarget};
use crate::loader::SourceContext;
use crate::placement::{Placement, PlacementPolicy};
use crate::scanner::{select_candidates, walk_directory};

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome")]
pub enum FileOutcome {
    #[serde(rename = "generated")]
    Generated {
        target: PathBuf,
        components: Vec<String>,
        /// The pass whose content is on disk.
        pass: Pass,
        placement: Placement,
        feedback: Option<FeedbackReport>,
    },
    #[serde(rename = "skipped-existing-manual-test")]
    SkippedManualTest { target: PathBuf },
    #[serde(rename = "skipped-no-components")]
    SkippedNoComponents,
    #[serde(rename = "failed-unreadable")]
    FailedUnreadable { code: &'static str, message: String },
    #[serde(rename = "failed-write")]
    FailedWrite {
        target: PathBuf,
        code: &'static str,
        message: String,
    },
}

impl FileOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Generated { .. } => "generated",
            Self::SkippedManualTest { .. } => "skipped-existing-manual-test",
            Self::SkippedNoComponents => "skipped-no-components",
            Self::FailedUnreadable { .. } => "failed-unreadable",
            Self::FailedWrite { .. } => "failed-write",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FailedUnreadable { .. } | Self::FailedWrite { .. })
    }
}

/// One line of the batch report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub outcome: FileOutcome,
}

/// Outcome counts by kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchCounts {
    pub generated: usize,
    pub refined: usize,
    pub skipped_manual: usize,
    pub skipped_no_components: usize,
    pub failed: usize,
}

/// Outcomes for every processed file, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn counts(&self) -> BatchCounts {
        let mut counts = BatchCounts::default();
        for report in &self.files {
            match &report.outcome {
                FileOutcome::Generated { feedback, .. } => {
                    counts.generated += 1;
                    if feedback.as_ref().is_some_and(|f| f.state == LoopState::Refined) {
                        counts.refined += 1;
                    }
                }
                FileOutcome::SkippedManualTest { .. } => counts.skipped_manual += 1,
                FileOutcome::SkippedNoComponents => counts.skipped_no_components += 1,
                FileOutcome::FailedUnreadable { .. } | FileOutcome::FailedWrite { .. } => {
                    counts.failed += 1
                }
            }
        }
        counts
    }

    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|f| f.outcome.is_failure())
    }

    pub fn outcome_for(&self, source: &Path) -> Option<&FileOutcome> {
        self.files
            .iter()
            .find(|f| f.source == source)
            .map(|f| &f.outcome)
    }
}

/// One scaffolding run over a project.
pub struct Batch {
    root: PathBuf,
    config: ScaffoldConfig,
    context: SourceContext,
    generator: Generator,
    placement: PlacementPolicy,
    feedback: Option<FeedbackLoop>,
    force_enriched: bool,
}

impl Batch {
    /// Set up the parsing toolchain and, when enabled, the feedback loop.
    pub fn new(config: ScaffoldConfig, root: &Path) -> Result<Self, EnvironmentError> {
        if !root.is_dir() {
            return Err(EnvironmentError::RootUnavailable {
                path: root.display().to_string(),
                message: "not a directory".to_string(),
            });
        }
        let context = SourceContext::new()?;
        let feedback = config
            .coverage
            .effective_enabled()
            .then(|| FeedbackLoop::from_config(&config.coverage, root));
        Ok(Self {
            root: root.to_path_buf(),
            generator: Generator::from_config(&config.generation),
            placement: PlacementPolicy::from_config(&config.generation),
            context,
            config,
            feedback,
            force_enriched: false,
        })
    }

    /// Replace the feedback loop (e.g. with a custom runner).
    pub fn with_feedback(mut self, feedback: FeedbackLoop) -> Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn without_feedback(mut self) -> Self {
        self.feedback = None;
        self
    }

    /// Generate pass 2 directly, skipping the feedback loop.
    pub fn enriched(mut self, yes: bool) -> Self {
        self.force_enriched = yes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    pub fn context(&self) -> &SourceContext {
        &self.context
    }

    pub fn placement(&self) -> &PlacementPolicy {
        &self.placement
    }

    /// The files a run would process: `paths` filtered, or the whole
    /// project when `paths` is empty.
    pub fn candidates(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        if paths.is_empty() {
            walk_directory(&self.root, &self.config.scan)
        } else {
            select_candidates(paths, &self.root, &self.config.scan)
        }
    }

    /// Process files strictly in order.
    pub fn run(&self, paths: &[PathBuf]) -> BatchReport {
        let files: Vec<FileReport> = paths.iter().map(|p| self.process_file(p)).collect();
        let report = BatchReport { files };
        let counts = report.counts();
        tracing::info!(
            generated = counts.generated,
            refined = counts.refined,
            skipped_manual = counts.skipped_manual,
            skipped_no_components = counts.skipped_no_components,
            failed = counts.failed,
            "batch complete"
        );
        report
    }

    pub fn process_file(&self, path: &Path) -> FileReport {
        let outcome = self.outcome_for(path);
        match &outcome {
            FileOutcome::FailedUnreadable { code, message }
            | FileOutcome::FailedWrite { code, message, .. } => {
                tracing::warn!(source = %path.display(), code, "{message}");
            }
            other => {
                tracing::info!(source = %path.display(), outcome = other.label(), "processed");
            }
        }
        FileReport {
            source: path.to_path_buf(),
            outcome,
        }
    }

    fn outcome_for(&self, path: &Path) -> FileOutcome {
        let file = match self.context.load_component_source(path) {
            Ok(file) => file,
            Err(e) => {
                return FileOutcome::FailedUnreadable {
                    code: e.error_code(),
                    message: e.to_string(),
                }
            }
        };

        let components = analyze(&file, &self.context);
        if components.is_empty() {
            return FileOutcome::SkippedNoComponents;
        }

        let target = self.placement.target_path(path);
        match self.placement.check(&target) {
            Ok(Placement::Protected) => return FileOutcome::SkippedManualTest { target },
            Ok(_) => {}
            Err(e) => return failed_write(target, e),
        }

        let import_path = self.placement.import_path(path);
        let source_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let scaffold_target = ScaffoldTarget {
            source_name,
            import_path: &import_path,
            typed: file.dialect.is_typed(),
        };
        let first_pass = if self.force_enriched {
            Pass::Enriched
        } else {
            Pass::Minimal
        };

        let content = self.generator.generate(&components, &scaffold_target, first_pass);
        let placement = match self.placement.write(&target, &content) {
            Ok(placement) => placement,
            Err(WriteError::ManualTestPresent { .. }) => {
                return FileOutcome::SkippedManualTest { target }
            }
            Err(e) => return failed_write(target, e),
        };

        let (pass, feedback) = match (&self.feedback, first_pass) {
            (Some(feedback), Pass::Minimal) => {
                let report = feedback.run(path, &target, &self.placement, || {
                    self.generator
                        .generate(&components, &scaffold_target, Pass::Enriched)
                });
                let pass = match report.state {
                    LoopState::Refined => Pass::Enriched,
                    LoopState::Initial => Pass::Minimal,
                };
                (pass, Some(report))
            }
            _ => (first_pass, None),
        };

        FileOutcome::Generated {
            target,
            components: components.into_iter().map(|c| c.name).collect(),
            pass,
            placement,
            feedback,
        }
    }
}

fn failed_write(target: PathBuf, e: WriteError) -> FileOutcome {
    FileOutcome::FailedWrite {
        target,
        code: e.error_code(),
        message: e.to_string(),
    }
}
