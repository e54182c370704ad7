use super::support::serve;
use reqwalker::core::acquire::{repository_archive, DEFAULT_BRANCH};
use reqwalker::core::{download_repository, extract_upload, Scanner};
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;

fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    File::create(path).unwrap().write_all(&zip_bytes(entries)).unwrap();
}

#[test]
fn test_uploaded_archive_is_analyzable() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("project.zip");
    write_zip(
        &archive,
        &[("project/app.py", "import helpers\nimport flask\n"), ("project/helpers.py", "import os\n")],
    );

    let extracted = dir.path().join("extracted");
    let outcome = extract_upload(&archive, &extracted);
    assert!(outcome.success, "{}", outcome.message);

    let scan = Scanner::with_defaults().scan(&extracted).unwrap();
    assert_eq!(scan.dependencies["project/app.py"], vec!["helpers.py"]);
    assert_eq!(scan.external_modules.iter().collect::<Vec<_>>(), vec!["flask", "os"]);
}

#[test]
fn test_download_repository_from_local_server() {
    let (_, zip_url) = repository_archive("http://placeholder/acme/widgets", "dev");
    let path = zip_url.trim_start_matches("http://placeholder");
    let base_url = serve(vec![(path, 200, zip_bytes(&[("widgets-dev/main.py", "import numpy\n")]))]);

    let dir = tempdir().unwrap();
    let outcome = download_repository(
        &format!("{}/acme/widgets", base_url),
        "dev",
        dir.path(),
        Duration::from_secs(5),
    );

    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.message, "Repository 'widgets' downloaded successfully.");
    assert!(dir.path().join("widgets.zip").is_file());
    assert!(dir.path().join("widgets-dev/main.py").is_file());
}

#[test]
fn test_download_non_zip_body() {
    let (_, zip_url) = repository_archive("http://placeholder/acme/widgets", DEFAULT_BRANCH);
    let path = zip_url.trim_start_matches("http://placeholder");
    let base_url = serve(vec![(path, 200, b"<html>not a zip</html>".to_vec())]);

    let dir = tempdir().unwrap();
    let outcome = download_repository(
        &format!("{}/acme/widgets", base_url),
        DEFAULT_BRANCH,
        dir.path(),
        Duration::from_secs(5),
    );

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Downloaded file is not a valid zip archive.");
}

#[test]
fn test_download_missing_branch() {
    let base_url = serve(vec![]);
    let dir = tempdir().unwrap();

    let outcome = download_repository(
        &format!("{}/acme/widgets", base_url),
        "no-such-branch",
        dir.path(),
        Duration::from_secs(5),
    );

    assert!(!outcome.success);
    assert!(outcome.message.starts_with("Network error while downloading repo:"), "{}", outcome.message);
}
