use super::support::{install, pypi_body, serve, write_project, FixedIndex};
use reqwalker::core::{Analyzer, Scanner};
use reqwalker::models::{ResolutionSource, Settings};
use reqwalker::parsers::{ImportMap, StdlibClassifier};
use reqwalker::resolver::{FileSink, SitePackages, VersionResolver};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn analyzer_with(index: Arc<FixedIndex>, site_packages: &Path, log: &Path) -> Analyzer {
    let resolver = VersionResolver::new(ImportMap::bundled().unwrap(), StdlibClassifier::bundled())
        .with_installed(Arc::new(SitePackages::from_dirs(&[site_packages.to_path_buf()])))
        .with_index(index)
        .with_sink(Arc::new(FileSink::new(log)))
        .with_jobs(4);

    Analyzer::from_parts(Scanner::with_defaults(), resolver)
}

#[test]
fn test_round_trip_manifest() {
    let project = tempdir().unwrap();
    let env = tempdir().unwrap();
    write_project(project.path(), &[("a.py", "import b\nimport os\n"), ("b.py", "import requests\n")]);

    let index = Arc::new(FixedIndex::new(&[("requests", "2.32.3")]));
    let report = analyzer_with(index, env.path(), &env.path().join("unresolved.log"))
        .analyze(project.path())
        .unwrap();

    assert_eq!(report.dependencies["a.py"], vec!["b.py"]);
    assert!(report.dependencies["b.py"].is_empty());
    assert_eq!(report.manifest, "requests==2.32.3");
    assert!(report.unresolved.is_empty());
    assert!(!env.path().join("unresolved.log").exists());
}

#[test]
fn test_stdlib_only_project_has_empty_manifest() {
    let project = tempdir().unwrap();
    let env = tempdir().unwrap();
    write_project(
        project.path(),
        &[("main.py", "import sys, json\nfrom collections import OrderedDict\nimport os.path\n")],
    );

    let index = Arc::new(FixedIndex::default());
    let report = analyzer_with(index.clone(), env.path(), &env.path().join("u.log"))
        .analyze(project.path())
        .unwrap();

    assert_eq!(report.manifest, "");
    assert!(report.requirements.is_empty());
    assert_eq!(report.summary.stdlib_modules, 4);
    assert!(index.calls().is_empty());
}

#[test]
fn test_installed_version_skips_index() {
    let project = tempdir().unwrap();
    let env = tempdir().unwrap();
    install(env.path(), "PyYAML", "6.0.1");
    write_project(project.path(), &[("main.py", "import yaml\n")]);

    let index = Arc::new(FixedIndex::new(&[("PyYAML", "9.9.9")]));
    let report = analyzer_with(index.clone(), env.path(), &env.path().join("u.log"))
        .analyze(project.path())
        .unwrap();

    assert_eq!(report.manifest, "PyYAML==6.0.1");
    assert_eq!(report.requirements[0].source, ResolutionSource::Installed);
    assert!(index.calls().is_empty());
}

#[test]
fn test_import_map_names_the_distribution() {
    let project = tempdir().unwrap();
    let env = tempdir().unwrap();
    write_project(project.path(), &[("main.py", "import sklearn\nfrom bs4 import BeautifulSoup\n")]);

    let index = Arc::new(FixedIndex::new(&[("scikit-learn", "1.5.2"), ("beautifulsoup4", "4.12.3")]));
    let report = analyzer_with(index.clone(), env.path(), &env.path().join("u.log"))
        .analyze(project.path())
        .unwrap();

    assert_eq!(report.manifest, "beautifulsoup4==4.12.3\nscikit-learn==1.5.2");
    let mut calls = index.calls();
    calls.sort();
    assert_eq!(calls, vec!["beautifulsoup4", "scikit-learn"]);
}

#[test]
fn test_invalid_file_does_not_stop_the_run() {
    let project = tempdir().unwrap();
    let env = tempdir().unwrap();
    write_project(project.path(), &[("broken.py", "class (:\n"), ("ok.py", "import attr\n")]);

    let index = Arc::new(FixedIndex::new(&[("attrs", "23.2.0")]));
    let report = analyzer_with(index, env.path(), &env.path().join("u.log"))
        .analyze(project.path())
        .unwrap();

    assert_eq!(report.manifest, "attrs==23.2.0");
    assert_eq!(report.skipped_files.len(), 1);
    assert_eq!(report.summary.files_skipped, 1);
    assert_eq!(report.summary.files_parsed, 1);
}

#[test]
fn test_unresolved_logged_once_per_run() {
    let project = tempdir().unwrap();
    let env = tempdir().unwrap();
    let log = env.path().join("unresolved_imports.log");
    write_project(
        project.path(),
        &[("one.py", "import mystery\n"), ("two.py", "import mystery\nimport zeta_internal\n")],
    );

    let analyzer = analyzer_with(Arc::new(FixedIndex::default()), env.path(), &log);

    let report = analyzer.analyze(project.path()).unwrap();
    assert_eq!(report.manifest, "mystery\nzeta_internal");
    assert_eq!(fs::read_to_string(&log).unwrap(), "mystery\nzeta_internal\n");

    analyzer.analyze(project.path()).unwrap();
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "mystery\nzeta_internal\nmystery\nzeta_internal\n"
    );
}

#[test]
fn test_analyzer_from_settings_against_local_index() {
    let base_url = serve(vec![
        ("/pypi/requests/json", 200, pypi_body("2.32.3")),
        ("/pypi/broken/json", 200, b"{\"info\": {}}".to_vec()),
    ]);

    let project = tempdir().unwrap();
    let env = tempdir().unwrap();
    install(env.path(), "click", "8.1.7");
    write_project(
        project.path(),
        &[("app.py", "import requests\nimport click\nimport broken\nimport nowhere\nimport os\n")],
    );

    let log = env.path().join("unresolved.log");
    let settings = Settings {
        scan_path: project.path().to_path_buf(),
        index_url: format!("{}/pypi", base_url),
        site_packages: vec![env.path().to_path_buf()],
        unresolved_log: log.clone(),
        timeout_secs: 5,
        jobs: 2,
        ..Settings::default()
    };

    let report = Analyzer::new(&settings).unwrap().analyze(project.path()).unwrap();

    assert_eq!(report.manifest, "broken\nclick==8.1.7\nnowhere\nrequests==2.32.3");
    assert_eq!(report.summary.pinned_installed, 1);
    assert_eq!(report.summary.pinned_index, 1);
    assert_eq!(report.summary.unresolved, 2);
    assert_eq!(fs::read_to_string(&log).unwrap(), "broken\nnowhere\n");
}

#[test]
fn test_offline_settings_never_pin_from_index() {
    let project = tempdir().unwrap();
    let env = tempdir().unwrap();
    write_project(project.path(), &[("app.py", "import requests\n")]);

    let settings = Settings {
        scan_path: project.path().to_path_buf(),
        site_packages: vec![env.path().to_path_buf()],
        unresolved_log: env.path().join("u.log"),
        offline: true,
        ..Settings::default()
    };

    let report = Analyzer::new(&settings).unwrap().analyze(project.path()).unwrap();
    assert_eq!(report.manifest, "requests");
    assert_eq!(report.unresolved.iter().collect::<Vec<_>>(), vec!["requests"]);
}

#[test]
fn test_missing_import_map_fails_construction() {
    let env = tempdir().unwrap();
    let settings = Settings {
        import_map: Some(env.path().join("missing.json")),
        site_packages: vec![env.path().to_path_buf()],
        ..Settings::default()
    };

    let err = Analyzer::new(&settings).err().unwrap();
    assert!(err.is_critical());
}
