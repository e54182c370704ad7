//! Configuration file and environment sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource, ENV_PRIORITY, FILE_PRIORITY};
use crate::error::{ReqwalkerError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".reqwalker.toml";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            priority: FILE_PRIORITY,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            priority: FILE_PRIORITY,
        }
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(ReqwalkerError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings read from `<PREFIX>_*` variables
const ENV_KEYS: &[&str] = &[
    "SCAN_PATH",
    "EXCLUDE",
    "MAX_DEPTH",
    "FOLLOW_LINKS",
    "EXACT_LOCAL_MATCH",
    "IMPORT_MAP",
    "UNRESOLVED_LOG",
    "INDEX_URL",
    "TIMEOUT",
    "JOBS",
    "OFFLINE",
    "SITE_PACKAGES",
    "PYTHON",
    "OUTPUT_FORMAT",
    "OUTPUT_FILE",
    "REQUIREMENTS_FILE",
    "GRAPH_OUTPUT",
];

/// Environment variable configuration source
pub struct EnvConfig {
    prefix: String,
    priority: u8,
}

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            priority: ENV_PRIORITY,
        }
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    fn parsed<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.var(key).and_then(|value| value.trim().parse().ok())
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.var(key).and_then(|value| match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        self.var(key).map(|value| {
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        Ok(PartialSettings {
            scan_path: self.var("SCAN_PATH").map(PathBuf::from),
            exclude_patterns: self.list("EXCLUDE"),
            max_depth: self.parsed("MAX_DEPTH"),
            follow_links: self.flag("FOLLOW_LINKS"),
            exact_local_match: self.flag("EXACT_LOCAL_MATCH"),
            import_map: self.var("IMPORT_MAP").map(PathBuf::from),
            unresolved_log: self.var("UNRESOLVED_LOG").map(PathBuf::from),
            index_url: self.var("INDEX_URL"),
            timeout_secs: self.parsed("TIMEOUT"),
            jobs: self.parsed("JOBS"),
            offline: self.flag("OFFLINE"),
            site_packages: self
                .list("SITE_PACKAGES")
                .map(|dirs| dirs.into_iter().map(PathBuf::from).collect()),
            python: self.var("PYTHON"),
            output_format: self.parsed("OUTPUT_FORMAT"),
            output_file: self.var("OUTPUT_FILE").map(PathBuf::from),
            requirements_file: self.var("REQUIREMENTS_FILE").map(PathBuf::from),
            graph_output: self.var("GRAPH_OUTPUT").map(PathBuf::from),
            ..Default::default()
        })
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
