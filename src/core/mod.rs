//! Core functionality for project scanning and requirement generation

pub mod acquire;
pub mod analyzer;
pub mod manifest;
pub mod parallel;
pub mod scanner;

pub use acquire::{download_repository, extract_upload, extract_zip, AcquireOutcome};
pub use analyzer::{AnalysisPhase, Analyzer};
pub use manifest::{build_manifest, write_manifest};
pub use scanner::{classify_import, ImportClass, LocalMatch, Scanner};
