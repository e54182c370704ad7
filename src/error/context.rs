//! Helpers for attaching context to foreign errors and reporting
//! recoverable ones.

use std::error::Error;
use std::fmt::Display;
use std::io;
use std::path::Path;

use crate::error::{ReqwalkerError, Result};

/// Extension trait for turning foreign errors into [`ReqwalkerError`]
pub trait ResultExt<T> {
    /// Wrap the error with a message, e.g. "Invalid exclude pattern: [a"
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;

    /// Attribute the error to `path`
    fn with_path<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|err| ReqwalkerError::Analysis {
            message: format!("{}: {}", context(), err),
        })
    }

    fn with_path<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| path_error(&err, path.as_ref()))
    }
}

/// Map an error raised while touching `path`.
///
/// I/O failures are looked for in the error itself and then in its source, so
/// wrappers such as `walkdir::Error` classify the same way as a bare
/// `io::Error`.
pub fn path_error(err: &(dyn Error + 'static), path: &Path) -> ReqwalkerError {
    let io_kind = err
        .downcast_ref::<io::Error>()
        .or_else(|| err.source().and_then(|s| s.downcast_ref::<io::Error>()))
        .map(io::Error::kind);

    match io_kind {
        Some(io::ErrorKind::PermissionDenied) => ReqwalkerError::permission_denied(path),
        Some(io::ErrorKind::NotFound) => ReqwalkerError::invalid_path(path),
        _ => ReqwalkerError::directory_traversal_error(path, err.to_string()),
    }
}

/// Print a recoverable problem to stderr
pub fn warn(message: impl Display) {
    eprintln!("Warning: {}", message);
}
