//! Installed distribution metadata
//!
//! Reads the `*.dist-info` and `*.egg-info` entries of site-packages
//! directories, the same metadata `importlib.metadata.version` consults.

use crate::error::{ReqwalkerError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const SITE_PACKAGES_QUERY: &str = "import site, sys\n\
paths = list(getattr(site, 'getsitepackages', lambda: [])())\n\
user = site.getusersitepackages() if hasattr(site, 'getusersitepackages') else None\n\
paths += [user] if user else []\n\
print('\\n'.join(p for p in sys.path if p.endswith('-packages') and p not in paths) + '\\n' + '\\n'.join(paths))";

/// Lookup of installed distribution versions
pub trait InstalledPackages: Send + Sync {
    /// Installed version of distribution `package`, if any
    fn installed_version(&self, package: &str) -> Option<String>;
}

/// Normalize a distribution name for comparison (PEP 503)
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;

    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !last_was_sep {
                out.push('-');
            }
            last_was_sep = true;
        } else {
            out.extend(c.to_lowercase());
            last_was_sep = false;
        }
    }

    out
}

/// Versions of the distributions installed in a set of site-packages directories
#[derive(Debug, Clone, Default)]
pub struct SitePackages {
    versions: HashMap<String, String>,
    dirs: Vec<PathBuf>,
}

impl SitePackages {
    /// Index the metadata found in `dirs`. Earlier directories win, as on `sys.path`.
    pub fn from_dirs(dirs: &[PathBuf]) -> Self {
        let mut versions = HashMap::new();

        for dir in dirs {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(_) => continue,
            };

            let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
            paths.sort();

            for path in paths {
                if let Some((name, version)) = read_distribution(&path) {
                    versions.entry(normalize_name(&name)).or_insert(version);
                }
            }
        }

        Self {
            versions,
            dirs: dirs.to_vec(),
        }
    }

    /// Build an index from explicit `(name, version)` pairs
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            versions: entries
                .into_iter()
                .map(|(k, v)| (normalize_name(k.as_ref()), v.into()))
                .collect(),
            dirs: Vec::new(),
        }
    }

    /// Configured directories if any, otherwise the ones the environment points at
    pub fn detect(configured: &[PathBuf], python: Option<&str>) -> Self {
        if !configured.is_empty() {
            return Self::from_dirs(configured);
        }

        let mut dirs = virtual_env_site_packages();
        let python = python.unwrap_or("python3");
        match interpreter_site_packages(python) {
            Ok(found) => dirs.extend(found),
            Err(err) => {
                if dirs.is_empty() {
                    crate::error::warn(err.user_message());
                }
            }
        }
        dirs.dedup();

        Self::from_dirs(&dirs)
    }

    /// Directories that were indexed
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl InstalledPackages for SitePackages {
    fn installed_version(&self, package: &str) -> Option<String> {
        self.versions.get(&normalize_name(package)).cloned()
    }
}

/// site-packages of the active virtualenv, if `VIRTUAL_ENV` is set
fn virtual_env_site_packages() -> Vec<PathBuf> {
    let venv = match std::env::var_os("VIRTUAL_ENV") {
        Some(venv) => PathBuf::from(venv),
        None => return Vec::new(),
    };

    let mut dirs = Vec::new();
    let pattern = venv.join("lib").join("python*").join("site-packages");
    if let Ok(paths) = glob::glob(&pattern.to_string_lossy()) {
        dirs.extend(paths.flatten());
    }

    let windows_dir = venv.join("Lib").join("site-packages");
    if windows_dir.is_dir() {
        dirs.push(windows_dir);
    }

    dirs
}

/// Ask `python` for its site-packages directories
fn interpreter_site_packages(python: &str) -> Result<Vec<PathBuf>> {
    let output = Command::new(python)
        .args(["-c", SITE_PACKAGES_QUERY])
        .output()
        .map_err(|e| ReqwalkerError::InstalledMetadata {
            path: PathBuf::from(python),
            message: format!("failed to run interpreter: {}", e),
        })?;

    if !output.status.success() {
        return Err(ReqwalkerError::InstalledMetadata {
            path: PathBuf::from(python),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .filter(|p| p.is_dir())
        .collect())
}

/// Name and version of the distribution described by a metadata entry
fn read_distribution(path: &Path) -> Option<(String, String)> {
    let file_name = path.file_name()?.to_string_lossy().into_owned();

    let (stem, metadata_file) = if let Some(stem) = file_name.strip_suffix(".dist-info") {
        (stem.to_string(), path.join("METADATA"))
    } else if let Some(stem) = file_name.strip_suffix(".egg-info") {
        // Old setuptools installs an egg-info file instead of a directory
        let pkg_info = if path.is_dir() { path.join("PKG-INFO") } else { path.to_path_buf() };
        (stem.to_string(), pkg_info)
    } else {
        return None;
    };

    if let Ok(content) = fs::read_to_string(&metadata_file) {
        if let Some(found) = parse_metadata(&content) {
            return Some(found);
        }
    }

    // Fall back to `<name>-<version>` in the entry name
    let (name, version) = stem.split_once('-')?;
    let version = version.split('-').next()?;
    Some((name.to_string(), version.to_string()))
}

/// `Name` and `Version` headers of a core metadata document
fn parse_metadata(content: &str) -> Option<(String, String)> {
    let mut name = None;
    let mut version = None;

    for line in content.lines() {
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Name:") {
            name.get_or_insert_with(|| value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("Version:") {
            version.get_or_insert_with(|| value.trim().to_string());
        }
    }

    Some((name?, version?))
}
