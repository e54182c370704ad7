//! Project acquisition from zip archives and repository snapshots
//!
//! Failures here are reported as an [`AcquireOutcome`] rather than an error,
//! so callers can print the message and carry on.

use crate::error::{ReqwalkerError, Result, ResultExt};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use ureq::Agent;
use zip::result::ZipError;
use zip::ZipArchive;

/// Branch downloaded when none is configured
pub const DEFAULT_BRANCH: &str = "main";

/// Timeout for repository downloads
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of an acquisition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireOutcome {
    pub success: bool,
    pub message: String,
}

impl AcquireOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    fn from_error(err: &ReqwalkerError) -> Self {
        match err {
            ReqwalkerError::Download { message, .. } => {
                Self::failed(format!("Network error while downloading repo: {}", message))
            }
            ReqwalkerError::Archive {
                source: ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_),
            } => Self::failed("Downloaded file is not a valid zip archive."),
            other => Self::failed(format!("Unexpected error: {}", other)),
        }
    }
}

/// Repository name and archive URL for `repo_url` at `branch`
pub fn repository_archive(repo_url: &str, branch: &str) -> (String, String) {
    let repo_url = repo_url.trim_end_matches('/');
    let repo_name = repo_url.rsplit('/').next().unwrap_or(repo_url).to_string();
    let zip_url = format!("{}/archive/refs/heads/{}.zip", repo_url, branch);
    (repo_name, zip_url)
}

/// Extract every entry of `archive` below `extract_dir`, returning the number of files written.
///
/// Entries whose names would escape `extract_dir` are skipped.
pub fn extract_zip(archive: &Path, extract_dir: &Path) -> Result<usize> {
    let file = File::open(archive).with_path(archive)?;
    let mut zip = ZipArchive::new(file)?;
    fs::create_dir_all(extract_dir)?;

    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let relative = match entry.enclosed_name() {
            Some(relative) => relative,
            None => continue,
        };
        let out = extract_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out)?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut target = File::create(&out)?;
        io::copy(&mut entry, &mut target)?;
        written += 1;
    }

    Ok(written)
}

/// Extract an uploaded archive into `extract_dir`
pub fn extract_upload(archive: &Path, extract_dir: &Path) -> AcquireOutcome {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| archive.display().to_string());

    match extract_zip(archive, extract_dir) {
        Ok(_) => AcquireOutcome::ok(format!("Archive '{}' extracted successfully.", name)),
        Err(err) => AcquireOutcome::from_error(&err),
    }
}

/// Download the `branch` snapshot of a repository and extract it into `extract_dir`.
///
/// The archive is kept next to the extracted tree as `<repo_name>.zip`.
pub fn download_repository(repo_url: &str, branch: &str, extract_dir: &Path, timeout: Duration) -> AcquireOutcome {
    let (repo_name, zip_url) = repository_archive(repo_url, branch);

    let result = fetch_archive(&zip_url, &extract_dir.join(format!("{}.zip", repo_name)), timeout)
        .and_then(|zip_path| extract_zip(&zip_path, extract_dir));

    match result {
        Ok(_) => AcquireOutcome::ok(format!("Repository '{}' downloaded successfully.", repo_name)),
        Err(err) => AcquireOutcome::from_error(&err),
    }
}

/// Save the body of `url` to `destination`. Any non-2xx status is an error.
fn fetch_archive(url: &str, destination: &Path, timeout: Duration) -> Result<PathBuf> {
    let config = Agent::config_builder().timeout_global(Some(timeout)).build();
    let agent = Agent::new_with_config(config);

    let to_download_error = |e: ureq::Error| ReqwalkerError::Download {
        url: url.to_string(),
        message: e.to_string(),
    };

    let response = agent.get(url).call().map_err(to_download_error)?;

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(destination)?;
    let mut body = response.into_body().into_reader();
    io::copy(&mut body, &mut file).map_err(|e| ReqwalkerError::Download {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(destination.to_path_buf())
}
