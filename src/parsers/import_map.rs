//! Import-name to distribution-name table
//!
//! Import statements use module names (`yaml`, `PIL`, `sklearn`) that often
//! differ from the name the package is published under (`PyYAML`, `Pillow`,
//! `scikit-learn`). The table is loaded once at startup and is read-only for
//! the rest of the process. Names missing from the table map to themselves.

use crate::error::{ReqwalkerError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Table shipped with the binary, used when no `import_map` is configured
const BUNDLED_IMPORTS: &str = include_str!("../../data/imports.json");

/// Immutable import-name -> distribution-name mapping
#[derive(Debug, Clone, Default)]
pub struct ImportMap {
    entries: HashMap<String, String>,
}

impl ImportMap {
    /// Load the table from a JSON object file.
    ///
    /// A missing or malformed file is a startup failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ReqwalkerError::ImportMapNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ReqwalkerError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// The table compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_IMPORTS, "<bundled imports.json>")
    }

    /// Load from `path` when given, otherwise use the bundled table
    pub fn from_settings(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    /// Build a table from explicit pairs
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn parse(content: &str, path: impl AsRef<Path>) -> Result<Self> {
        let entries: HashMap<String, String> =
            serde_json::from_str(content).map_err(|e| ReqwalkerError::ImportMapParse {
                path: path.as_ref().to_path_buf(),
                source: e,
            })?;

        Ok(Self { entries })
    }

    /// Distribution name for an import name, or the import name itself
    pub fn resolve_package_name<'a>(&'a self, import_name: &'a str) -> &'a str {
        self.entries
            .get(import_name)
            .map(String::as_str)
            .unwrap_or(import_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
