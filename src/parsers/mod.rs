//! Parsing functionality for Python sources and bundled tables
//!
//! This module provides the Python import extractor, the import-name to
//! distribution-name table, and the standard-library classifier.

pub mod ast_parser;
pub mod import_map;
pub mod stdlib;

pub use ast_parser::{ImportKind, ImportParser, ImportRecord};
pub use import_map::ImportMap;
pub use stdlib::StdlibClassifier;
