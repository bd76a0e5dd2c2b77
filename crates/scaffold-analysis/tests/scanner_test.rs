//! Input selection tests: directory walk, explicit lists, test-file filter.

use std::fs;
use std::path::{Path, PathBuf};

use scaffold_analysis::scanner::{select_candidates, walk_directory, CandidateFilter, Dialect};
use scaffold_core::config::ScanConfig;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "export {};\n").unwrap();
}

#[test]
fn walk_finds_component_sources_only() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for file in [
        "src/Button.tsx",
        "src/Button.test.tsx",
        "src/Card.stories.jsx",
        "src/__tests__/Helper.tsx",
        "src/api.ts",
        "src/index.js",
        "node_modules/pkg/index.js",
        "dist/bundle.js",
    ] {
        touch(root, file);
    }

    let files = walk_directory(root, &ScanConfig::default());
    let relative: Vec<PathBuf> = files
        .iter()
        .map(|f| f.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        relative,
        vec![PathBuf::from("src/Button.tsx"), PathBuf::from("src/index.js")]
    );
}

#[test]
fn walk_honors_scaffoldignore() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "src/Keep.tsx");
    touch(root, "legacy/Old.tsx");
    fs::write(root.join(".scaffoldignore"), "legacy/\n").unwrap();

    let files = walk_directory(root, &ScanConfig::default());
    assert_eq!(files, vec![root.join("src/Keep.tsx")]);
}

#[test]
fn invalid_ignore_pattern_keeps_default_ignores() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "src/Keep.tsx");
    touch(root, "node_modules/pkg/Dep.tsx");
    touch(root, "legacy/Old.tsx");

    let config = ScanConfig {
        extra_ignore: vec!["legacy/**".to_string(), "src/[".to_string()],
        ..ScanConfig::default()
    };
    let files = walk_directory(root, &config);
    assert_eq!(files, vec![root.join("src/Keep.tsx")]);
}

#[test]
fn explicit_selection_filters_resolves_and_dedupes() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let paths = vec![
        PathBuf::from("src/B.tsx"),
        root.join("src/A.tsx"),
        PathBuf::from("src/B.tsx"),
        PathBuf::from("src/B.test.tsx"),
        PathBuf::from("README.md"),
        PathBuf::from("src/Missing.jsx"),
    ];
    let selected = select_candidates(&paths, root, &ScanConfig::default());
    assert_eq!(
        selected,
        vec![
            root.join("src/B.tsx"),
            root.join("src/A.tsx"),
            root.join("src/Missing.jsx"),
        ]
    );
}

#[test]
fn custom_extensions_replace_defaults() {
    let config = ScanConfig {
        extensions: vec!["tsx".to_string()],
        ..ScanConfig::default()
    };
    let filter = CandidateFilter::from_config(&config);
    let root = Path::new("/project");
    assert!(filter.accepts(Path::new("/project/src/A.tsx"), root));
    assert!(!filter.accepts(Path::new("/project/src/a.js"), root));
}

#[test]
fn project_under_a_test_directory_is_not_excluded() {
    let filter = CandidateFilter::from_config(&ScanConfig::default());
    let root = Path::new("/home/me/test/app");
    assert!(filter.accepts(Path::new("/home/me/test/app/src/App.tsx"), root));
    assert!(!filter.accepts(Path::new("/home/me/test/app/tests/App.tsx"), root));
}

#[test]
fn dialects_by_extension() {
    assert_eq!(Dialect::from_path(Path::new("a.tsx")), Some(Dialect::Tsx));
    assert!(Dialect::Tsx.is_markup_capable());
    assert!(Dialect::Tsx.is_typed());
    assert!(!Dialect::TypeScript.is_markup_capable());
    assert!(Dialect::Jsx.is_markup_capable());
    assert!(!Dialect::Jsx.is_typed());
    assert_eq!(Dialect::from_path(Path::new("a.css")), None);
}
