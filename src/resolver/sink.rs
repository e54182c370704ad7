//! Destinations for unresolved import names

use crate::error::{ReqwalkerError, Result};
use crate::models::config::DEFAULT_UNRESOLVED_LOG;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Receives the names that could not be pinned, once per resolver run
pub trait UnresolvedSink: Send + Sync {
    /// Record `names`, which arrive sorted. Empty sets are never passed.
    fn record(&self, names: &BTreeSet<String>) -> Result<()>;
}

/// Appends one name per line to a log file. The file is never truncated.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new(DEFAULT_UNRESOLVED_LOG)
    }
}

impl UnresolvedSink for FileSink {
    fn record(&self, names: &BTreeSet<String>) -> Result<()> {
        let to_log_error = |source| ReqwalkerError::UnresolvedLog {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(to_log_error)?;

        let mut buffer = String::new();
        for name in names {
            buffer.push_str(name);
            buffer.push('\n');
        }

        file.write_all(buffer.as_bytes()).map_err(to_log_error)
    }
}

/// Keeps recorded names in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every name recorded so far, in recording order
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl UnresolvedSink for MemorySink {
    fn record(&self, names: &BTreeSet<String>) -> Result<()> {
        self.lines.lock().extend(names.iter().cloned());
        Ok(())
    }
}
