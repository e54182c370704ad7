//! Analysis result structures

use super::requirement::{Requirement, ResolutionSource};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

/// Source file identifier (path relative to the project root) -> local edge targets.
///
/// Insertion order follows the file walk, edge order follows the statement
/// walk. Duplicate edges are kept.
pub type DependencyMap = IndexMap<String, Vec<String>>;

/// Outcome of scanning a single source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileScan {
    /// The file parsed; its import roots are split into local edges and external names
    Parsed {
        file: String,
        local_edges: Vec<String>,
        external: Vec<String>,
    },
    /// The file could not be read or parsed and contributes nothing
    Skipped { file: String, reason: String },
}

impl FileScan {
    /// Relative identifier of the scanned file
    pub fn file(&self) -> &str {
        match self {
            FileScan::Parsed { file, .. } | FileScan::Skipped { file, .. } => file,
        }
    }

    /// Whether the file was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, FileScan::Skipped { .. })
    }
}

/// A source file the scanner had to skip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// Everything the scanner learned about a project tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    pub dependencies: DependencyMap,
    pub external_modules: BTreeSet<String>,
    pub skipped_files: Vec<SkippedFile>,
    pub files_discovered: usize,
}

impl ScanResult {
    /// Create an empty scan result
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file outcome into the result
    pub fn add_file(&mut self, scan: FileScan) {
        match scan {
            FileScan::Parsed {
                file,
                local_edges,
                external,
            } => {
                self.dependencies
                    .entry(file)
                    .or_default()
                    .extend(local_edges);
                self.external_modules.extend(external);
            }
            FileScan::Skipped { file, reason } => {
                self.skipped_files.push(SkippedFile { file, reason });
            }
        }
    }

    /// Total number of local edges across all files
    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(Vec::len).sum()
    }
}

/// Complete result of analysing one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub project_root: PathBuf,
    pub dependencies: DependencyMap,
    pub external_modules: BTreeSet<String>,
    pub requirements: Vec<Requirement>,
    pub unresolved: BTreeSet<String>,
    pub skipped_files: Vec<SkippedFile>,
    pub manifest: String,
    pub summary: AnalysisSummary,
    pub analysis_date: chrono::DateTime<chrono::Utc>,
}

/// Summary statistics from analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub files_discovered: usize,
    pub files_parsed: usize,
    pub files_skipped: usize,
    pub local_edges: usize,
    pub external_modules: usize,
    pub stdlib_modules: usize,
    pub requirements: usize,
    pub pinned_installed: usize,
    pub pinned_index: usize,
    pub unresolved: usize,
    pub scan_duration: Duration,
    pub resolve_duration: Duration,
}

impl AnalysisSummary {
    /// Build the summary from the scan and the resolved requirements
    pub fn from_parts(scan: &ScanResult, requirements: &[Requirement], stdlib_modules: usize) -> Self {
        let count = |source: ResolutionSource| {
            requirements.iter().filter(|r| r.source == source).count()
        };

        Self {
            files_discovered: scan.files_discovered,
            files_parsed: scan.dependencies.len(),
            files_skipped: scan.skipped_files.len(),
            local_edges: scan.edge_count(),
            external_modules: scan.external_modules.len(),
            stdlib_modules,
            requirements: requirements.len(),
            pinned_installed: count(ResolutionSource::Installed),
            pinned_index: count(ResolutionSource::Index),
            unresolved: count(ResolutionSource::Unresolved),
            scan_duration: Duration::ZERO,
            resolve_duration: Duration::ZERO,
        }
    }

    /// Format a duration as a human-readable string
    pub fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs();
        let millis = duration.subsec_millis();

        if secs == 0 {
            format!("{}ms", millis)
        } else if secs < 60 {
            format!("{}.{:03}s", secs, millis)
        } else {
            let mins = secs / 60;
            let secs = secs % 60;
            format!("{}m {}s", mins, secs)
        }
    }
}
