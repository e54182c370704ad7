use super::support::write_project;
use reqwalker::core::{LocalMatch, Scanner};
use reqwalker::models::Settings;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_round_trip_two_files() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), &[("a.py", "import b\nimport os\n"), ("b.py", "import requests\n")]);

    let scan = Scanner::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(scan.dependencies.len(), 2);
    assert_eq!(scan.dependencies["a.py"], vec!["b.py"]);
    assert!(scan.dependencies["b.py"].is_empty());
    let external: Vec<_> = scan.external_modules.iter().cloned().collect();
    assert_eq!(external, vec!["os", "requests"]);
}

#[test]
fn test_from_imports_and_nested_statements() {
    let dir = tempdir().unwrap();
    write_project(
        dir.path(),
        &[(
            "main.py",
            "from xml.etree import ElementTree\n\
             def load():\n    import numpy.linalg as la\n    return la\n\
             try:\n    import simplejson\nexcept ImportError:\n    pass\n",
        )],
    );

    let scan = Scanner::with_defaults().scan(dir.path()).unwrap();
    let external: Vec<_> = scan.external_modules.iter().cloned().collect();
    assert_eq!(external, vec!["numpy", "simplejson", "xml"]);
}

#[test]
fn test_bare_relative_imports_name_nothing() {
    let dir = tempdir().unwrap();
    write_project(
        dir.path(),
        &[("pkg/mod.py", "from . import sibling\nfrom .mod import helper\nimport zlib\n")],
    );

    let scan = Scanner::with_defaults().scan(dir.path()).unwrap();
    assert_eq!(scan.external_modules.iter().collect::<Vec<_>>(), vec!["zlib"]);
    assert_eq!(scan.dependencies["pkg/mod.py"], vec!["mod.py"]);
}

#[test]
fn test_invalid_syntax_is_skipped() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), &[("bad.py", "def broken(:\n"), ("good.py", "import flask\n")]);

    let scan = Scanner::with_defaults().scan(dir.path()).unwrap();

    assert_eq!(scan.files_discovered, 2);
    assert_eq!(scan.skipped_files.len(), 1);
    assert_eq!(scan.skipped_files[0].file, "bad.py");
    assert!(scan.skipped_files[0].reason.starts_with("Unsupported or invalid Python syntax"));
    assert!(!scan.dependencies.contains_key("bad.py"));
    assert!(scan.external_modules.contains("flask"));
}

#[test]
fn test_substring_and_exact_matching_differ() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), &[("app.py", "import util\n"), ("utility.py", "")]);

    let loose = Scanner::with_defaults().scan(dir.path()).unwrap();
    assert_eq!(loose.dependencies["app.py"], vec!["util.py"]);
    assert!(loose.external_modules.is_empty());

    let exact = Scanner::with_defaults()
        .with_local_match(LocalMatch::ExactStem)
        .scan(dir.path())
        .unwrap();
    assert!(exact.dependencies["app.py"].is_empty());
    assert!(exact.external_modules.contains("util"));
}

#[test]
fn test_exclude_patterns_and_depth() {
    let dir = tempdir().unwrap();
    write_project(
        dir.path(),
        &[
            ("main.py", "import click\n"),
            ("venv/lib/site.py", "import should_not_appear\n"),
            ("deep/er/still.py", "import too_deep\n"),
        ],
    );

    let settings = Settings {
        scan_path: dir.path().to_path_buf(),
        exclude_patterns: vec!["venv".to_string()],
        max_depth: Some(2),
        ..Settings::default()
    };
    let scan = Scanner::new(&settings).unwrap().scan(dir.path()).unwrap();

    assert_eq!(scan.external_modules.iter().collect::<Vec<_>>(), vec!["click"]);
    assert_eq!(scan.files_discovered, 1);
}

#[test]
fn test_missing_root_is_an_error() {
    let missing = PathBuf::from("/definitely/not/a/project");
    assert!(Scanner::with_defaults().scan(&missing).is_err());
}

#[test]
fn test_empty_project() {
    let dir = tempdir().unwrap();
    let scan = Scanner::with_defaults().scan(dir.path()).unwrap();
    assert!(scan.dependencies.is_empty());
    assert!(scan.external_modules.is_empty());
}
