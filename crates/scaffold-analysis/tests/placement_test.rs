//! File placement policy tests: target paths, manual-test protection,
//! regeneration of marked files.

use std::fs;
use std::path::{Path, PathBuf};

use scaffold_analysis::placement::{
    carries_marker, Placement, PlacementPolicy, GENERATED_HEADER, GENERATED_MARKER,
};
use scaffold_core::config::GenerationConfig;
use scaffold_core::errors::WriteError;

fn generated(body: &str) -> String {
    format!("{GENERATED_HEADER}\n{body}\n")
}

#[test]
fn target_sits_next_to_the_source() {
    let policy = PlacementPolicy::default();
    assert_eq!(
        policy.target_path(Path::new("src/Button.tsx")),
        PathBuf::from("src/Button.test.tsx")
    );
    assert_eq!(policy.import_path(Path::new("src/Button.tsx")), "./Button");
    assert_eq!(
        policy.target_path(Path::new("lib/card.jsx")),
        PathBuf::from("lib/card.test.jsx")
    );
}

#[test]
fn configured_directory_and_suffix() {
    let config = GenerationConfig {
        test_suffix: Some("spec".into()),
        test_directory: Some("__tests__".into()),
        ..GenerationConfig::default()
    };
    let policy = PlacementPolicy::from_config(&config);
    assert_eq!(
        policy.target_path(Path::new("src/Button.tsx")),
        PathBuf::from("src/__tests__/Button.spec.tsx")
    );
    assert_eq!(policy.import_path(Path::new("src/Button.tsx")), "../Button");
}

#[test]
fn marker_must_lead_the_file() {
    assert!(carries_marker(GENERATED_MARKER));
    assert!(carries_marker(&format!("\n\n  {GENERATED_HEADER}\nit();")));
    assert!(!carries_marker(&format!("import x;\n{GENERATED_HEADER}")));
    assert!(!carries_marker(""));
}

#[test]
fn create_then_regenerate() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("Button.test.tsx");
    let policy = PlacementPolicy::default();

    assert_eq!(policy.check(&target).unwrap(), Placement::Create);
    assert_eq!(policy.write(&target, &generated("first")).unwrap(), Placement::Create);
    assert_eq!(policy.check(&target).unwrap(), Placement::Regenerate);
    assert_eq!(
        policy.write(&target, &generated("second")).unwrap(),
        Placement::Regenerate
    );
    assert_eq!(fs::read_to_string(&target).unwrap(), generated("second"));
}

#[test]
fn manual_test_is_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("Button.test.tsx");
    let manual = "import { render } from '@testing-library/react';\n// hand-written\n";
    fs::write(&target, manual).unwrap();
    let policy = PlacementPolicy::default();

    assert_eq!(policy.check(&target).unwrap(), Placement::Protected);
    let err = policy.write(&target, &generated("new")).unwrap_err();
    assert!(matches!(err, WriteError::ManualTestPresent { .. }));
    assert_eq!(fs::read_to_string(&target).unwrap(), manual);
}

#[test]
fn marker_removed_by_the_user_protects_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("Card.test.tsx");
    let policy = PlacementPolicy::default();
    policy.write(&target, &generated("it('a')")).unwrap();

    let edited = fs::read_to_string(&target)
        .unwrap()
        .replacen(GENERATED_HEADER, "// kept by hand", 1);
    fs::write(&target, &edited).unwrap();

    assert_eq!(policy.check(&target).unwrap(), Placement::Protected);
}

#[test]
fn unmarked_content_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("X.test.tsx");
    let err = PlacementPolicy::default()
        .write(&target, "it('x', () => {});\n")
        .unwrap_err();
    assert!(matches!(err, WriteError::MissingMarker { .. }));
    assert!(!target.exists());
}

#[test]
fn non_utf8_and_directories_are_protected() {
    let dir = tempfile::tempdir().unwrap();
    let policy = PlacementPolicy::default();

    let binary = dir.path().join("Bin.test.tsx");
    fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
    assert_eq!(policy.check(&binary).unwrap(), Placement::Protected);

    let directory = dir.path().join("Dir.test.tsx");
    fs::create_dir(&directory).unwrap();
    assert_eq!(policy.check(&directory).unwrap(), Placement::Protected);
}

#[test]
fn missing_test_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerationConfig {
        test_directory: Some("__tests__".into()),
        ..GenerationConfig::default()
    };
    let policy = PlacementPolicy::from_config(&config);
    let target = policy.target_path(&dir.path().join("Nav.tsx"));
    policy.write(&target, &generated("ok")).unwrap();
    assert!(dir.path().join("__tests__/Nav.test.tsx").is_file());
}
