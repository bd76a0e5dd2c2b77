//! Configuration tests: defaults, TOML parsing, layering, validation.

use std::fs;

use scaffold_core::config::{CliOverrides, ScaffoldConfig, TestFramework};
use scaffold_core::errors::ConfigError;
use scaffold_core::ScaffoldErrorCode;

#[test]
fn defaults_match_documented_values() {
    let config = ScaffoldConfig::default();

    assert_eq!(config.scan.effective_max_file_size(), 1_048_576);
    assert_eq!(config.scan.effective_extensions(), vec!["tsx", "jsx", "js"]);
    assert!(config
        .scan
        .effective_test_dir_names()
        .contains(&"__tests__".to_string()));
    assert_eq!(config.generation.effective_framework(), TestFramework::Jest);
    assert!(config.generation.effective_variants());
    assert_eq!(config.generation.effective_max_buttons(), 2);
    assert_eq!(config.generation.effective_max_inputs(), 2);
    assert_eq!(config.generation.effective_test_suffix(), "test");
    assert!(config.generation.wrapper().is_none());
    assert!(!config.coverage.effective_enabled());
    assert_eq!(config.coverage.effective_threshold(), 50.0);
    assert_eq!(
        config.coverage.effective_summary_path(),
        "coverage/coverage-summary.json"
    );
    assert_eq!(config.coverage.effective_command()[0], "npx");
}

#[test]
fn parses_full_toml() {
    let config = ScaffoldConfig::from_toml(
        r#"
        [scan]
        extensions = ["tsx"]

        [generation]
        framework = "vitest"
        variants = false
        test_directory = "__tests__"
        wrapper_import = "../test-utils/AppProviders"
        wrapper_name = "AppProviders"

        [coverage]
        enabled = true
        threshold = 65.5
        command = ["npx", "vitest", "run", "{test_file}"]
        timeout_seconds = 120
        "#,
    )
    .unwrap();

    assert_eq!(config.scan.effective_extensions(), vec!["tsx"]);
    assert_eq!(config.generation.effective_framework(), TestFramework::Vitest);
    assert!(!config.generation.effective_variants());
    assert_eq!(config.generation.test_directory.as_deref(), Some("__tests__"));
    assert_eq!(
        config.generation.wrapper(),
        Some(("../test-utils/AppProviders", "AppProviders"))
    );
    assert!(config.coverage.effective_enabled());
    assert_eq!(config.coverage.effective_threshold(), 65.5);
    assert_eq!(config.coverage.effective_command()[1], "vitest");
    assert_eq!(config.coverage.timeout_seconds, Some(120));
}

#[test]
fn rejects_out_of_range_threshold() {
    let err = ScaffoldConfig::from_toml("[coverage]\nthreshold = 150.0\n").unwrap_err();
    match &err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "coverage.threshold"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn rejects_half_configured_wrapper() {
    let err = ScaffoldConfig::from_toml("[generation]\nwrapper_name = \"Providers\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn rejects_dotted_test_suffix() {
    let err = ScaffoldConfig::from_toml("[generation]\ntest_suffix = \"unit.test\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn rejects_invalid_toml() {
    let err = ScaffoldConfig::from_toml("[generation\nframework = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn load_reads_project_file_and_cli_wins() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("scaffold.toml"),
        "[coverage]\nenabled = true\nthreshold = 40.0\n",
    )
    .unwrap();

    let cli = CliOverrides {
        coverage_threshold: Some(75.0),
        ..Default::default()
    };
    let config = ScaffoldConfig::load(dir.path(), Some(&cli)).unwrap();

    assert!(config.coverage.effective_enabled());
    assert_eq!(config.coverage.effective_threshold(), 75.0);
}

#[test]
fn load_without_project_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScaffoldConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.generation.effective_test_suffix(), "test");
}

#[test]
fn explicit_config_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let cli = CliOverrides {
        config_path: Some(dir.path().join("missing.toml")),
        ..Default::default()
    };
    let err = ScaffoldConfig::load(dir.path(), Some(&cli)).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn to_toml_round_trips_settings() {
    let mut config = ScaffoldConfig::default();
    config.generation.framework = Some(TestFramework::Vitest);
    config.coverage.threshold = Some(30.0);

    let text = config.to_toml().unwrap();
    let back = ScaffoldConfig::from_toml(&text).unwrap();

    assert_eq!(back.generation.effective_framework(), TestFramework::Vitest);
    assert_eq!(back.coverage.effective_threshold(), 30.0);
}
