//! requirements.txt rendering

use crate::error::{ReqwalkerError, Result};
use crate::models::Requirement;
use std::fs;
use std::path::Path;

/// Join the requirement lines with `\n`, in the order given, without a trailing newline
pub fn build_manifest(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write a manifest to `path`, replacing any previous content
pub fn write_manifest(path: &Path, manifest: &str) -> Result<()> {
    fs::write(path, manifest).map_err(|e| ReqwalkerError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
