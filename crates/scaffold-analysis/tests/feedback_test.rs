//! Coverage feedback loop tests
//!
//! Fake runners and coverage sources drive the loop through its outcomes;
//! the json-summary reader is tested against real files on disk.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use scaffold_analysis::coverage::{
    CommandRunner, CoverageSource, FailureStage, FeedbackLoop, JsonSummaryReader, LoopState,
    TestRunner,
};
use scaffold_analysis::placement::{PlacementPolicy, GENERATED_HEADER};
use scaffold_core::errors::{CoverageError, RunnerError};

// ============================================================================
// Fakes
// ============================================================================

struct FakeRunner {
    calls: Rc<Cell<usize>>,
    fail: bool,
}

impl TestRunner for FakeRunner {
    fn run(&self, _test_file: &Path, _source_file: &Path) -> Result<(), RunnerError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(RunnerError::NonZeroExit {
                command: "npx jest".into(),
                code: 1,
            });
        }
        Ok(())
    }
}

/// Returns the queued percentages in order, one per measurement.
struct FakeCoverage {
    readings: RefCell<Vec<f64>>,
}

impl CoverageSource for FakeCoverage {
    fn reset(&self) -> Result<(), CoverageError> {
        Ok(())
    }

    fn line_coverage(&self, source_file: &Path) -> Result<f64, CoverageError> {
        let mut readings = self.readings.borrow_mut();
        if readings.is_empty() {
            return Err(CoverageError::NoEntry {
                source_file: source_file.to_path_buf(),
            });
        }
        Ok(readings.remove(0))
    }
}

fn feedback(readings: &[f64], fail: bool) -> (FeedbackLoop, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let runner = FakeRunner {
        calls: Rc::clone(&calls),
        fail,
    };
    let coverage = FakeCoverage {
        readings: RefCell::new(readings.to_vec()),
    };
    (
        FeedbackLoop::new(Box::new(runner), Box::new(coverage), 50.0),
        calls,
    )
}

fn pass_one(dir: &Path) -> std::path::PathBuf {
    let test_file = dir.join("Button.test.tsx");
    fs::write(&test_file, format!("{GENERATED_HEADER}\n// pass 1\n")).unwrap();
    test_file
}

// ============================================================================
// Loop outcomes
// ============================================================================

#[test]
fn low_coverage_triggers_one_refinement() {
    let dir = tempfile::tempdir().unwrap();
    let test_file = pass_one(dir.path());
    let (feedback, calls) = feedback(&[35.0, 68.0], false);
    let refined = Cell::new(false);

    let report = feedback.run(
        &dir.path().join("Button.tsx"),
        &test_file,
        &PlacementPolicy::default(),
        || {
            refined.set(true);
            format!("{GENERATED_HEADER}\n// pass 2\n")
        },
    );

    assert!(refined.get());
    assert_eq!(report.state, LoopState::Refined);
    assert_eq!(report.initial_coverage, Some(35.0));
    assert_eq!(report.refined_coverage, Some(68.0));
    assert!(report.failure.is_none());
    assert_eq!(calls.get(), 2);
    assert!(fs::read_to_string(&test_file).unwrap().contains("// pass 2"));
}

#[test]
fn sufficient_coverage_keeps_pass_one() {
    let dir = tempfile::tempdir().unwrap();
    let test_file = pass_one(dir.path());
    let (feedback, calls) = feedback(&[72.0], false);

    let report = feedback.run(
        &dir.path().join("Button.tsx"),
        &test_file,
        &PlacementPolicy::default(),
        || panic!("pass 2 must not be generated"),
    );

    assert_eq!(report.state, LoopState::Initial);
    assert_eq!(report.initial_coverage, Some(72.0));
    assert_eq!(report.refined_coverage, None);
    assert_eq!(calls.get(), 1);
    assert!(fs::read_to_string(&test_file).unwrap().contains("// pass 1"));
}

#[test]
fn coverage_equal_to_threshold_is_enough() {
    let dir = tempfile::tempdir().unwrap();
    let test_file = pass_one(dir.path());
    let (feedback, _) = feedback(&[50.0], false);
    let report = feedback.run(
        &dir.path().join("Button.tsx"),
        &test_file,
        &PlacementPolicy::default(),
        || panic!("no refinement at the threshold"),
    );
    assert_eq!(report.state, LoopState::Initial);
}

#[test]
fn runner_failure_is_recorded_and_not_retried() {
    let dir = tempfile::tempdir().unwrap();
    let test_file = pass_one(dir.path());
    let (feedback, calls) = feedback(&[10.0], true);

    let report = feedback.run(
        &dir.path().join("Button.tsx"),
        &test_file,
        &PlacementPolicy::default(),
        || panic!("no refinement after a runner failure"),
    );

    assert_eq!(report.state, LoopState::Initial);
    assert_eq!(report.initial_coverage, None);
    let failure = report.failure.unwrap();
    assert_eq!(failure.stage, FailureStage::Runner);
    assert_eq!(failure.code, "RUNNER_INVOCATION_FAILED");
    assert_eq!(calls.get(), 1);
}

#[test]
fn missing_coverage_entry_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let test_file = pass_one(dir.path());
    let (feedback, _) = feedback(&[], false);

    let report = feedback.run(
        &dir.path().join("Button.tsx"),
        &test_file,
        &PlacementPolicy::default(),
        || panic!("no refinement without a measurement"),
    );
    let failure = report.failure.unwrap();
    assert_eq!(failure.stage, FailureStage::Coverage);
    assert_eq!(failure.code, "COVERAGE_UNREADABLE");
}

#[test]
fn failed_remeasurement_still_reports_refined() {
    let dir = tempfile::tempdir().unwrap();
    let test_file = pass_one(dir.path());
    let (feedback, _) = feedback(&[20.0], false);

    let report = feedback.run(
        &dir.path().join("Button.tsx"),
        &test_file,
        &PlacementPolicy::default(),
        || format!("{GENERATED_HEADER}\n// pass 2\n"),
    );
    assert_eq!(report.state, LoopState::Refined);
    assert_eq!(report.refined_coverage, None);
    assert_eq!(report.failure.unwrap().stage, FailureStage::Coverage);
}

// ============================================================================
// json-summary reader
// ============================================================================

fn write_summary(root: &Path, body: &str) {
    fs::create_dir_all(root.join("coverage")).unwrap();
    fs::write(root.join("coverage/coverage-summary.json"), body).unwrap();
}

#[test]
fn reads_line_percentage_for_absolute_keys() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let source = root.join("src/Button.tsx");
    let body = format!(
        r#"{{
  "total": {{ "lines": {{ "total": 10, "covered": 9, "skipped": 0, "pct": 90 }} }},
  "{}": {{ "lines": {{ "total": 20, "covered": 7, "skipped": 0, "pct": 35 }} }}
}}"#,
        source.display()
    );
    write_summary(root, &body);

    let reader = JsonSummaryReader::new(root, "coverage/coverage-summary.json");
    assert_eq!(reader.line_coverage(&source).unwrap(), 35.0);
}

#[test]
fn reads_root_relative_keys() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_summary(
        root,
        r#"{ "src/Card.tsx": { "lines": { "total": 4, "covered": 3, "skipped": 0, "pct": 75.5 } } }"#,
    );
    let reader = JsonSummaryReader::new(root, "coverage/coverage-summary.json");
    assert_eq!(reader.line_coverage(&root.join("src/Card.tsx")).unwrap(), 75.5);
}

#[test]
fn only_total_entry_is_no_entry() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_summary(
        root,
        r#"{ "total": { "lines": { "total": 4, "covered": 3, "skipped": 0, "pct": 75 } } }"#,
    );
    let reader = JsonSummaryReader::new(root, "coverage/coverage-summary.json");
    assert!(matches!(
        reader.line_coverage(&root.join("src/Card.tsx")),
        Err(CoverageError::NoEntry { .. })
    ));
}

#[test]
fn missing_and_malformed_summaries() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let reader = JsonSummaryReader::new(root, "coverage/coverage-summary.json");
    assert!(matches!(
        reader.line_coverage(&root.join("A.tsx")),
        Err(CoverageError::SummaryMissing { .. })
    ));

    write_summary(root, "{ not json");
    assert!(matches!(
        reader.line_coverage(&root.join("A.tsx")),
        Err(CoverageError::Malformed { .. })
    ));
}

#[test]
fn reset_removes_a_stale_summary() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_summary(root, "{}");
    let reader = JsonSummaryReader::new(root, "coverage/coverage-summary.json");
    reader.reset().unwrap();
    assert!(!reader.summary_path().exists());
    reader.reset().unwrap();
}

// ============================================================================
// Command runner
// ============================================================================

#[test]
fn placeholders_are_substituted_root_relative() {
    let runner = CommandRunner::new(
        vec![
            "npx".into(),
            "vitest".into(),
            "run".into(),
            "{test_file}".into(),
            "--coverage.include={source_file}".into(),
        ],
        "/project",
    );
    let args = runner.arguments(
        Path::new("/project/src/Button.test.tsx"),
        Path::new("/project/src/Button.tsx"),
    );
    assert_eq!(
        args,
        vec![
            "npx",
            "vitest",
            "run",
            "src/Button.test.tsx",
            "--coverage.include=src/Button.tsx",
        ]
    );
}

#[test]
fn empty_command_is_an_error() {
    let runner = CommandRunner::new(Vec::new(), "/project");
    assert!(matches!(
        runner.run(Path::new("a"), Path::new("b")),
        Err(RunnerError::EmptyCommand)
    ));
}

#[cfg(unix)]
#[test]
fn non_zero_exit_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let runner = CommandRunner::new(vec!["false".into()], dir.path());
    assert!(matches!(
        runner.run(Path::new("a"), Path::new("b")),
        Err(RunnerError::NonZeroExit { code: 1, .. })
    ));
}

#[cfg(unix)]
#[test]
fn slow_runner_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let runner = CommandRunner::new(vec!["sleep".into(), "5".into()], dir.path())
        .with_timeout(std::time::Duration::from_millis(200));
    assert!(matches!(
        runner.run(Path::new("a"), Path::new("b")),
        Err(RunnerError::TimedOut { .. })
    ));
}
