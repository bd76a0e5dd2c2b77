//! Human-readable batch summary.

use std::fmt::Write as _;
use std::path::Path;

use scaffold_analysis::pipeline::{BatchReport, FileOutcome};

/// One line per file, then the totals.
pub fn render_summary(report: &BatchReport, root: &Path) -> String {
    let mut out = String::new();
    for file in &report.files {
        let source = relative(&file.source, root);
        let _ = match &file.outcome {
            FileOutcome::Generated {
                target,
                components,
                pass,
                feedback,
                ..
            } => {
                let coverage = feedback
                    .as_ref()
                    .and_then(|f| f.refined_coverage.or(f.initial_coverage))
                    .map(|pct| format!(", coverage {pct:.1}%"))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "generated  {source} -> {} [{}] (pass {}{coverage})",
                    relative(target, root),
                    components.join(", "),
                    pass.number()
                )
            }
            FileOutcome::SkippedManualTest { target } => {
                writeln!(out, "skipped    {source} (manual test {})", relative(target, root))
            }
            FileOutcome::SkippedNoComponents => writeln!(out, "skipped    {source} (no components)"),
            FileOutcome::FailedUnreadable { code, message }
            | FileOutcome::FailedWrite { code, message, .. } => {
                writeln!(out, "failed     {source} [{code}] {message}")
            }
        };
    }

    let counts = report.counts();
    let _ = writeln!(
        out,
        "\n{} generated ({} refined), {} skipped (manual test), {} skipped (no components), {} failed",
        counts.generated,
        counts.refined,
        counts.skipped_manual,
        counts.skipped_no_components,
        counts.failed
    );
    out
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
