//! Version resolution for external modules
//!
//! Turns the external module set of a scan into requirement lines. Each
//! module is mapped to its distribution name, then pinned to the installed
//! version if there is one, or to the latest version on the package index.
//! Modules that resolve neither way become bare names and are reported to an
//! [`UnresolvedSink`].

pub mod index;
pub mod installed;
pub mod sink;

pub use index::{OfflineIndex, PackageIndex, PyPiClient};
pub use installed::{normalize_name, InstalledPackages, SitePackages};
pub use sink::{FileSink, MemorySink, UnresolvedSink};

use crate::core::parallel::{process_keyed, ProgressUpdate};
use crate::error::{warn, Result};
use crate::models::{Requirement, Resolution, ResolutionSource, Settings};
use crate::parsers::{ImportMap, StdlibClassifier};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Resolves import names to pinned requirements
pub struct VersionResolver {
    import_map: Arc<ImportMap>,
    stdlib: Arc<StdlibClassifier>,
    installed: Arc<dyn InstalledPackages>,
    index: Arc<dyn PackageIndex>,
    sink: Option<Arc<dyn UnresolvedSink>>,
    jobs: usize,
}

impl VersionResolver {
    /// Resolver with no installed packages, no index and no sink
    pub fn new(import_map: ImportMap, stdlib: StdlibClassifier) -> Self {
        Self {
            import_map: Arc::new(import_map),
            stdlib: Arc::new(stdlib),
            installed: Arc::new(SitePackages::default()),
            index: Arc::new(OfflineIndex),
            sink: None,
            jobs: 1,
        }
    }

    /// Resolver wired to the environment described by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let import_map = ImportMap::from_settings(settings.import_map.as_ref())?;
        let stdlib = StdlibClassifier::detect(settings.python.as_deref());
        let installed = SitePackages::detect(&settings.site_packages, settings.python.as_deref());

        let resolver = Self::new(import_map, stdlib)
            .with_installed(Arc::new(installed))
            .with_sink(Arc::new(FileSink::new(&settings.unresolved_log)))
            .with_jobs(settings.jobs);

        Ok(if settings.offline {
            resolver
        } else {
            resolver.with_index(Arc::new(PyPiClient::new(
                &settings.index_url,
                Duration::from_secs(settings.timeout_secs),
            )))
        })
    }

    pub fn with_installed(mut self, installed: Arc<dyn InstalledPackages>) -> Self {
        self.installed = installed;
        self
    }

    pub fn with_index(mut self, index: Arc<dyn PackageIndex>) -> Self {
        self.index = index;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn UnresolvedSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Number of concurrent lookups
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn import_map(&self) -> &ImportMap {
        &self.import_map
    }

    pub fn stdlib(&self) -> &StdlibClassifier {
        &self.stdlib
    }

    /// Resolve every module of `modules`
    pub fn resolve_all(&self, modules: &BTreeSet<String>) -> Result<Resolution> {
        self.resolve_all_with_progress(modules, |_| {})
    }

    /// Resolve every module of `modules`, reporting each finished lookup.
    ///
    /// Standard-library modules are dropped. The requirements come back in
    /// sorted import-name order whatever the number of jobs, and the
    /// unresolved names are recorded once per call.
    pub fn resolve_all_with_progress<P>(&self, modules: &BTreeSet<String>, progress_callback: P) -> Result<Resolution>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let (stdlib, candidates): (BTreeSet<String>, Vec<String>) = {
            let mut stdlib = BTreeSet::new();
            let mut candidates = Vec::new();
            for module in modules {
                if self.stdlib.is_stdlib(module) {
                    stdlib.insert(module.clone());
                } else {
                    candidates.push(module.clone());
                }
            }
            (stdlib, candidates)
        };

        let resolved = process_keyed(candidates, self.jobs, |module| self.resolve_one(module), progress_callback)?;

        let requirements: Vec<Requirement> = resolved.into_values().collect();
        let unresolved: BTreeSet<String> = requirements
            .iter()
            .filter(|r| r.source == ResolutionSource::Unresolved)
            .map(|r| r.import_name.clone())
            .collect();

        if let (Some(sink), false) = (&self.sink, unresolved.is_empty()) {
            if let Err(err) = sink.record(&unresolved) {
                // Never critical; reported and the run goes on
                warn(err.user_message());
            }
        }

        Ok(Resolution {
            requirements,
            unresolved,
            stdlib,
        })
    }

    /// Resolve a single non-stdlib import name
    pub fn resolve_one(&self, import_name: &str) -> Requirement {
        let package = self.import_map.resolve_package_name(import_name);

        if let Some(version) = self.installed.installed_version(package) {
            return Requirement::pinned(import_name, package, version, ResolutionSource::Installed);
        }

        match self.index.latest_version(package) {
            Ok(version) => Requirement::pinned(import_name, package, version, ResolutionSource::Index),
            Err(_) => Requirement::unpinned(import_name, package),
        }
    }
}
