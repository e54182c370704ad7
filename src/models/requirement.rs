//! Resolved requirement lines

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Where a requirement's version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Installed distribution metadata in the local environment
    Installed,
    /// Latest release reported by the package index
    Index,
    /// No version could be determined
    Unresolved,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionSource::Installed => write!(f, "installed"),
            ResolutionSource::Index => write!(f, "index"),
            ResolutionSource::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// One line of the requirements manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Root module name as it appeared in the import statement
    pub import_name: String,
    /// Distribution name used to install the package
    pub package: String,
    pub version: Option<String>,
    pub source: ResolutionSource,
}

impl Requirement {
    /// A requirement pinned to `version`
    pub fn pinned(
        import_name: impl Into<String>,
        package: impl Into<String>,
        version: impl Into<String>,
        source: ResolutionSource,
    ) -> Self {
        Self {
            import_name: import_name.into(),
            package: package.into(),
            version: Some(version.into()),
            source,
        }
    }

    /// A bare, unpinned requirement
    pub fn unpinned(import_name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            import_name: import_name.into(),
            package: package.into(),
            version: None,
            source: ResolutionSource::Unresolved,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.version.is_some()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}=={}", self.package, version),
            None => write!(f, "{}", self.package),
        }
    }
}

/// Output of the version resolver for one batch of external modules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Requirement lines in sorted import-name order
    pub requirements: Vec<Requirement>,
    /// Import names that fell back to a bare requirement
    pub unresolved: BTreeSet<String>,
    /// External names dropped because they belong to the standard library
    pub stdlib: BTreeSet<String>,
}
