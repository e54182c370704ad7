//! Package index client
//!
//! Queries the PyPI JSON API (`GET {index_url}/{package}/json`) for the
//! latest published version of a distribution.

use crate::error::{ReqwalkerError, Result};
use serde::Deserialize;
use std::io::BufReader;
use std::time::Duration;
use ureq::Agent;

/// Source of latest published versions
pub trait PackageIndex: Send + Sync {
    /// Latest version of distribution `package`
    fn latest_version(&self, package: &str) -> Result<String>;
}

/// PyPI JSON API response, reduced to what is read
#[derive(Debug, Deserialize)]
struct ProjectMetadata {
    info: ProjectInfo,
}

#[derive(Debug, Deserialize)]
struct ProjectInfo {
    version: Option<String>,
}

/// Blocking client for a PyPI-compatible JSON index
pub struct PyPiClient {
    agent: Agent,
    index_url: String,
}

impl PyPiClient {
    /// Client for `index_url` with a per-request timeout
    pub fn new(index_url: &str, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: Agent::new_with_config(config),
            index_url: index_url.trim_end_matches('/').to_string(),
        }
    }

    /// Metadata URL of `package`
    pub fn project_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.index_url, package)
    }
}

impl PackageIndex for PyPiClient {
    fn latest_version(&self, package: &str) -> Result<String> {
        let url = self.project_url(package);

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| ReqwalkerError::index_request_error(package, e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(ReqwalkerError::IndexStatus {
                package: package.to_string(),
                status,
            });
        }

        // Streamed rather than read to a string, which caps bodies at 10 MiB
        let reader = BufReader::new(response.into_body().into_reader());
        let metadata: ProjectMetadata = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                ReqwalkerError::index_request_error(package, e.to_string())
            } else {
                response_error(package, e)
            }
        })?;

        metadata_version(package, metadata)
    }
}

/// Extract `info.version` from a project metadata document
pub fn parse_latest_version(package: &str, body: &str) -> Result<String> {
    let metadata: ProjectMetadata = serde_json::from_str(body).map_err(|e| response_error(package, e))?;
    metadata_version(package, metadata)
}

fn metadata_version(package: &str, metadata: ProjectMetadata) -> Result<String> {
    match metadata.info.version {
        Some(version) if !version.trim().is_empty() => Ok(version.trim().to_string()),
        _ => Err(response_error(package, "response has no version")),
    }
}

fn response_error(package: &str, message: impl ToString) -> ReqwalkerError {
    ReqwalkerError::IndexResponse {
        package: package.to_string(),
        message: message.to_string(),
    }
}

/// Index that never answers, used in offline mode
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineIndex;

impl PackageIndex for OfflineIndex {
    fn latest_version(&self, package: &str) -> Result<String> {
        Err(ReqwalkerError::index_request_error(package, "offline mode"))
    }
}
