//! Project analysis
//!
//! Runs the scanner over a project tree, resolves the external modules it
//! found and renders the requirements manifest.

use crate::core::manifest::build_manifest;
use crate::core::parallel::ProgressUpdate;
use crate::core::scanner::Scanner;
use crate::error::Result;
use crate::models::{AnalysisReport, AnalysisSummary, Settings};
use crate::resolver::VersionResolver;
use std::fmt;
use std::path::Path;
use std::time::Instant;

/// Stage of an analysis a progress update belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Scan,
    Resolve,
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisPhase::Scan => write!(f, "Scanning"),
            AnalysisPhase::Resolve => write!(f, "Resolving"),
        }
    }
}

/// Scanner and resolver wired together
pub struct Analyzer {
    scanner: Scanner,
    resolver: VersionResolver,
}

impl Analyzer {
    /// Build the scanner and resolver described by `settings`
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            scanner: Scanner::new(settings)?,
            resolver: VersionResolver::from_settings(settings)?,
        })
    }

    pub fn from_parts(scanner: Scanner, resolver: VersionResolver) -> Self {
        Self { scanner, resolver }
    }

    pub fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }

    /// Analyze the project at `root`
    pub fn analyze(&self, root: &Path) -> Result<AnalysisReport> {
        self.analyze_with_progress(root, |_, _| {})
    }

    /// Analyze the project at `root`, reporting progress for both phases
    pub fn analyze_with_progress<P>(&self, root: &Path, progress: P) -> Result<AnalysisReport>
    where
        P: Fn(AnalysisPhase, ProgressUpdate) + Send + Sync,
    {
        let scan_start = Instant::now();
        let scan = self.scanner.scan_with_progress(root, |current, total, file| {
            progress(AnalysisPhase::Scan, ProgressUpdate::new(current, total, file))
        })?;
        let scan_duration = scan_start.elapsed();

        let resolve_start = Instant::now();
        let resolution = self
            .resolver
            .resolve_all_with_progress(&scan.external_modules, |update| progress(AnalysisPhase::Resolve, update))?;
        let resolve_duration = resolve_start.elapsed();

        let manifest = build_manifest(&resolution.requirements);

        let mut summary = AnalysisSummary::from_parts(&scan, &resolution.requirements, resolution.stdlib.len());
        summary.scan_duration = scan_duration;
        summary.resolve_duration = resolve_duration;

        Ok(AnalysisReport {
            project_root: root.to_path_buf(),
            dependencies: scan.dependencies,
            external_modules: scan.external_modules,
            requirements: resolution.requirements,
            unresolved: resolution.unresolved,
            skipped_files: scan.skipped_files,
            manifest,
            summary,
            analysis_date: chrono::Utc::now(),
        })
    }
}
