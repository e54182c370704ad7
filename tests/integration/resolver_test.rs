use super::support::{pypi_body, serve};
use reqwalker::error::ReqwalkerError;
use reqwalker::resolver::{normalize_name, InstalledPackages, PackageIndex, PyPiClient, SitePackages};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_pypi_client_reads_latest_version() {
    let base_url = serve(vec![("/pypi/requests/json", 200, pypi_body("2.32.3"))]);
    let client = PyPiClient::new(&format!("{}/pypi/", base_url), Duration::from_secs(5));

    assert_eq!(client.project_url("requests"), format!("{}/pypi/requests/json", base_url));
    assert_eq!(client.latest_version("requests").unwrap(), "2.32.3");
}

#[test]
fn test_pypi_client_reads_bodies_over_ten_mib() {
    // Projects with long release histories produce very large documents
    let filler = "x".repeat(11 * 1024 * 1024);
    let body = format!(
        "{{\"info\": {{\"name\": \"numpy\", \"version\": \"1.66.0\"}}, \"releases\": {{\"0.1\": [{{\"comment_text\": \"{}\"}}]}}}}",
        filler
    );
    let base_url = serve(vec![("/numpy/json", 200, body.into_bytes())]);
    let client = PyPiClient::new(&base_url, Duration::from_secs(30));

    assert_eq!(client.latest_version("numpy").unwrap(), "1.66.0");
}

#[test]
fn test_pypi_client_non_200_is_an_error() {
    let base_url = serve(vec![]);
    let client = PyPiClient::new(&base_url, Duration::from_secs(5));

    let err = client.latest_version("does-not-exist").unwrap_err();
    assert!(matches!(err, ReqwalkerError::IndexStatus { status: 404, .. }));
    assert!(!err.is_critical());
}

#[test]
fn test_pypi_client_malformed_body() {
    let base_url = serve(vec![
        ("/garbage/json", 200, b"<html>".to_vec()),
        ("/empty/json", 200, b"{\"info\": {\"version\": \"\"}}".to_vec()),
    ]);
    let client = PyPiClient::new(&base_url, Duration::from_secs(5));

    assert!(matches!(
        client.latest_version("garbage"),
        Err(ReqwalkerError::IndexResponse { .. })
    ));
    assert!(matches!(
        client.latest_version("empty"),
        Err(ReqwalkerError::IndexResponse { .. })
    ));
}

#[test]
fn test_pypi_client_unreachable_index() {
    let client = PyPiClient::new("http://127.0.0.1:9", Duration::from_secs(2));
    assert!(matches!(
        client.latest_version("requests"),
        Err(ReqwalkerError::IndexRequest { .. })
    ));
}

#[test]
fn test_site_packages_egg_info_and_precedence() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();

    let egg = first.path().join("Django_Extensions-3.2.3.egg-info");
    fs::create_dir_all(&egg).unwrap();
    fs::write(egg.join("PKG-INFO"), "Metadata-Version: 1.2\nName: django-extensions\nVersion: 3.2.3\n").unwrap();

    for (dir, version) in [(first.path(), "1.0.0"), (second.path(), "2.0.0")] {
        let dist = dir.join(format!("shared_pkg-{}.dist-info", version));
        fs::create_dir_all(&dist).unwrap();
        fs::write(dist.join("METADATA"), format!("Name: shared-pkg\nVersion: {}\n", version)).unwrap();
    }

    let installed = SitePackages::from_dirs(&[first.path().to_path_buf(), second.path().to_path_buf()]);

    assert_eq!(installed.installed_version("Django.Extensions").as_deref(), Some("3.2.3"));
    assert_eq!(installed.installed_version("shared_pkg").as_deref(), Some("1.0.0"));
    assert_eq!(installed.installed_version("absent"), None);
    assert_eq!(installed.dirs().len(), 2);
}

#[test]
fn test_normalize_name() {
    assert_eq!(normalize_name("Friendly__Bard"), "friendly-bard");
    assert_eq!(normalize_name("zope.interface"), "zope-interface");
}
