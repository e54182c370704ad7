use super::support::{install, write_project};
use clap::Parser;
use reqwalker::cli::{Args, Command};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_offline_run_writes_requirements_and_graph() {
    let project = tempdir().unwrap();
    let work = tempdir().unwrap();
    install(work.path(), "PyYAML", "6.0.1");
    write_project(
        project.path(),
        &[("main.py", "import yaml\nimport helper\nimport private_sdk\n"), ("helper.py", "import os\n")],
    );

    let requirements = work.path().join("requirements.txt");
    let report = work.path().join("report.json");
    let graph = work.path().join("deps.dot");
    let log = work.path().join("unresolved.log");

    let args = Args::try_parse_from([
        "reqwalker",
        "--path",
        &project.path().display().to_string(),
        "--offline",
        "--site-packages",
        &work.path().display().to_string(),
        "--unresolved-log",
        &log.display().to_string(),
        "--requirements-file",
        &requirements.display().to_string(),
        "--graph-output",
        &graph.display().to_string(),
        "--output",
        "json",
        "--output-file",
        &report.display().to_string(),
        "--no-progress",
        "--quiet",
    ])
    .unwrap();

    assert_eq!(Command::from_args(args).run(), 0);

    assert_eq!(fs::read_to_string(&requirements).unwrap(), "private_sdk\nPyYAML==6.0.1");
    assert_eq!(fs::read_to_string(&log).unwrap(), "private_sdk\n");
    assert!(fs::read_to_string(&graph).unwrap().contains("\"main.py\" -> \"helper.py\";"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["summary"]["requirements"], 2);
}

#[test]
fn test_zip_source_run() {
    let work = tempdir().unwrap();
    let archive = work.path().join("upload.zip");
    {
        use std::io::Write;
        let mut zip = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
        zip.start_file("proj/app.py", zip::write::SimpleFileOptions::default()).unwrap();
        zip.write_all(b"import json\n").unwrap();
        zip.finish().unwrap();
    }
    let requirements = work.path().join("requirements.txt");

    let args = Args::try_parse_from([
        "reqwalker",
        "--zip",
        &archive.display().to_string(),
        "--offline",
        "--site-packages",
        &work.path().display().to_string(),
        "--requirements-file",
        &requirements.display().to_string(),
        "--output-file",
        &work.path().join("report.txt").display().to_string(),
        "--quiet",
    ])
    .unwrap();

    assert_eq!(Command::from_args(args).run(), 0);
    assert_eq!(fs::read_to_string(&requirements).unwrap(), "");
}

#[test]
fn test_exit_codes_follow_severity() {
    // Missing project directory is an ordinary error
    let missing_path = Args::try_parse_from(["reqwalker", "--path", "/no/such/project", "--quiet"]).unwrap();
    assert_eq!(Command::from_args(missing_path).run(), 1);

    // A broken archive cannot be acquired
    let work = tempdir().unwrap();
    let archive = work.path().join("bad.zip");
    fs::write(&archive, "nope").unwrap();
    let bad_zip = Args::try_parse_from(["reqwalker", "--zip", &archive.display().to_string(), "--quiet"]).unwrap();
    assert_eq!(Command::from_args(bad_zip).run(), 1);

    // An explicit config file that does not exist is critical
    let missing_config = Args::try_parse_from(["reqwalker", "--config", "/no/such/reqwalker.toml"]).unwrap();
    assert_eq!(Command::from_args(missing_config).run(), 2);
}
