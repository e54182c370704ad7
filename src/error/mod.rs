//! Error handling for reqwalker
//!
//! This module provides the error type shared by the scanner, the resolver and
//! the acquisition helpers, plus context utilities for attaching paths and
//! messages to foreign errors.

pub mod context;
pub mod types;

pub use context::{path_error, warn, ResultExt};
pub use types::{ErrorSeverity, ReqwalkerError, Result};
