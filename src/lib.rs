//! reqwalker - requirements.txt generator for Python projects
//!
//! Scans a project tree for `import` statements, separates project-local
//! modules from third-party ones, and pins each third-party distribution to
//! its installed version or to the latest release on the package index.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod resolver;

// Re-export commonly used types
pub use crate::core::{Analyzer, Scanner};
pub use error::{ErrorSeverity, ReqwalkerError, Result, ResultExt};
pub use models::{
    analysis::{AnalysisReport, AnalysisSummary},
    config::Settings,
    requirement::{Requirement, ResolutionSource},
};
pub use resolver::VersionResolver;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
