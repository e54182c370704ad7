use super::support::{write_project, FixedIndex};
use reqwalker::core::{write_manifest, Analyzer, Scanner};
use reqwalker::models::{AnalysisReport, OutputFormat};
use reqwalker::output::{create_formatter, to_dot, write_graph};
use reqwalker::parsers::{ImportMap, StdlibClassifier};
use reqwalker::resolver::VersionResolver;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn analyze(root: &Path) -> AnalysisReport {
    let resolver = VersionResolver::new(ImportMap::bundled().unwrap(), StdlibClassifier::bundled())
        .with_index(Arc::new(FixedIndex::new(&[("requests", "2.32.3"), ("PyYAML", "6.0.2")])));
    Analyzer::from_parts(Scanner::with_defaults(), resolver)
        .analyze(root)
        .unwrap()
}

fn cyclic_project(root: &Path) {
    write_project(
        root,
        &[
            ("alpha.py", "import beta\nimport requests\n"),
            ("beta.py", "import alpha\nimport yaml\n"),
            ("gamma.py", "import beta\nimport beta\nimport internal_only\n"),
        ],
    );
}

#[test]
fn test_quiet_text_is_the_manifest() {
    let dir = tempdir().unwrap();
    cyclic_project(dir.path());
    let report = analyze(dir.path());

    let quiet = create_formatter(OutputFormat::Text, false, false, true).format(&report).unwrap();
    assert_eq!(quiet, "internal_only\nrequests==2.32.3\nPyYAML==6.0.2\n");
}

#[test]
fn test_json_report_shape() {
    let dir = tempdir().unwrap();
    cyclic_project(dir.path());
    let report = analyze(dir.path());

    let json = create_formatter(OutputFormat::Json, false, false, false).format(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    // Duplicate edges survive in the map
    assert_eq!(value["dependencies"]["gamma.py"], serde_json::json!(["beta.py", "beta.py"]));
    assert_eq!(value["unresolved"], serde_json::json!(["internal_only"]));
    assert_eq!(value["summary"]["pinned_index"], 2);
}

#[test]
fn test_csv_report_rows() {
    let dir = tempdir().unwrap();
    cyclic_project(dir.path());
    let report = analyze(dir.path());

    let csv = create_formatter(OutputFormat::Csv, false, false, false).format(&report).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "yaml,PyYAML,6.0.2,index,PyYAML==6.0.2");
}

#[test]
fn test_graph_marks_cycles_and_dedups_edges() {
    let dir = tempdir().unwrap();
    cyclic_project(dir.path());
    let report = analyze(dir.path());

    let dot = to_dot(&report.dependencies);
    assert!(dot.contains("\"alpha.py\" -> \"beta.py\" [color=red, style=bold];"));
    assert!(dot.contains("\"beta.py\" -> \"alpha.py\" [color=red, style=bold];"));
    assert_eq!(dot.matches("\"gamma.py\" -> \"beta.py\";").count(), 1);

    let out = dir.path().join("deps.dot");
    write_graph(&out, &report.dependencies).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), dot);
}

#[test]
fn test_manifest_file_matches_report() {
    let dir = tempdir().unwrap();
    cyclic_project(dir.path());
    let report = analyze(dir.path());

    let out = dir.path().join("requirements.txt");
    write_manifest(&out, &report.manifest).unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "internal_only\nrequests==2.32.3\nPyYAML==6.0.2"
    );
}
