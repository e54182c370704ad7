//! Data models and structures for reqwalker

pub mod analysis;
pub mod config;
pub mod requirement;

pub use analysis::{AnalysisReport, AnalysisSummary, DependencyMap, FileScan, ScanResult, SkippedFile};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use requirement::{Requirement, Resolution, ResolutionSource};
