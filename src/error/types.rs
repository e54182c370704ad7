//! Error types and definitions for reqwalker
//!
//! Every failure the analysis pipeline can produce is a variant of
//! [`ReqwalkerError`]. Each variant carries a severity so callers can decide
//! whether to skip the item, fail the current step, or stop the process.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for reqwalker operations
#[derive(Debug, Error)]
pub enum ReqwalkerError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Source file could not be read
    #[error("Error reading source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file is not Python the parser accepts (3.11 grammar; PEP 701
    /// f-strings from 3.12 are rejected)
    #[error("Unsupported or invalid Python syntax in {path}: {message}")]
    SourceParse { path: PathBuf, message: String },

    /// Import-to-package table is missing
    #[error("Import map not found at {path}")]
    ImportMapNotFound { path: PathBuf },

    /// Import-to-package table is not a JSON object of strings
    #[error("Error parsing import map {path}: {source}")]
    ImportMapParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// Package index request failed (network, timeout, TLS)
    #[error("Package index request for '{package}' failed: {message}")]
    IndexRequest { package: String, message: String },

    /// Package index answered with something other than 200
    #[error("Package index returned status {status} for '{package}'")]
    IndexStatus { package: String, status: u16 },

    /// Package index body did not contain `info.version`
    #[error("Malformed package index response for '{package}': {message}")]
    IndexResponse { package: String, message: String },

    /// Installed metadata could not be read
    #[error("Error reading installed package metadata in {path}: {message}")]
    InstalledMetadata { path: PathBuf, message: String },

    /// Unresolved log could not be written
    #[error("Error writing unresolved imports log {path}: {source}")]
    UnresolvedLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Repository archive download errors
    #[error("Network error while downloading {url}: {message}")]
    Download { url: String, message: String },

    /// Zip archive errors
    #[error("Archive error: {source}")]
    Archive {
        #[source]
        source: zip::result::ZipError,
    },

    /// Project could not be acquired from an archive or repository
    #[error("{message}")]
    Acquire { message: String },

    /// Worker pool errors
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },

    /// Analysis errors with context
    #[error("Analysis error: {message}")]
    Analysis { message: String },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV output was not valid UTF-8
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl ReqwalkerError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - the item is skipped and the run continues
            ReqwalkerError::SourceRead { .. } => ErrorSeverity::Warning,
            ReqwalkerError::SourceParse { .. } => ErrorSeverity::Warning,
            ReqwalkerError::PermissionDenied { .. } => ErrorSeverity::Warning,
            ReqwalkerError::IndexRequest { .. } => ErrorSeverity::Warning,
            ReqwalkerError::IndexStatus { .. } => ErrorSeverity::Warning,
            ReqwalkerError::IndexResponse { .. } => ErrorSeverity::Warning,
            ReqwalkerError::InstalledMetadata { .. } => ErrorSeverity::Warning,
            ReqwalkerError::UnresolvedLog { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            ReqwalkerError::ImportMapNotFound { .. } => ErrorSeverity::Critical,
            ReqwalkerError::ImportMapParse { .. } => ErrorSeverity::Critical,
            ReqwalkerError::Config { .. } => ErrorSeverity::Critical,
            ReqwalkerError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            ReqwalkerError::ConfigRead { .. } => ErrorSeverity::Critical,
            ReqwalkerError::ConfigParse { .. } => ErrorSeverity::Critical,
            ReqwalkerError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            ReqwalkerError::StdoutWrite { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ReqwalkerError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            ReqwalkerError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide a valid project directory.", path.display())
            }
            ReqwalkerError::ImportMapNotFound { path } => {
                format!("Import map not found at '{}'. Point --import-map at a JSON file or omit it to use the bundled table.", path.display())
            }
            ReqwalkerError::ImportMapParse { path, source } => {
                format!("Import map '{}' is not a JSON object of strings: {}.", path.display(), source)
            }
            ReqwalkerError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create one with --init or use command line options.", path.display())
            }
            ReqwalkerError::SourceParse { path, message } => {
                format!(
                    "Skipping '{}': unsupported or invalid syntax ({}). Python 3.12 f-string syntax is not supported; its imports are not counted.",
                    path.display(),
                    message
                )
            }
            ReqwalkerError::UnresolvedLog { path, source } => {
                format!("Could not append to '{}': {}. Unresolved imports were not logged.", path.display(), source)
            }
            ReqwalkerError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        ReqwalkerError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        ReqwalkerError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        ReqwalkerError::PermissionDenied { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        ReqwalkerError::InvalidPath { path: path.into() }
    }

    /// Create an analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        ReqwalkerError::Analysis {
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ReqwalkerError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a package index transport error
    pub fn index_request_error(package: impl Into<String>, message: impl Into<String>) -> Self {
        ReqwalkerError::IndexRequest {
            package: package.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ReqwalkerError {
    fn from(err: std::io::Error) -> Self {
        ReqwalkerError::io_error(err)
    }
}

impl From<toml::de::Error> for ReqwalkerError {
    fn from(err: toml::de::Error) -> Self {
        ReqwalkerError::TomlParse { source: err }
    }
}

impl From<csv::Error> for ReqwalkerError {
    fn from(err: csv::Error) -> Self {
        ReqwalkerError::Csv { source: err }
    }
}

impl From<glob::PatternError> for ReqwalkerError {
    fn from(err: glob::PatternError) -> Self {
        ReqwalkerError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for ReqwalkerError {
    fn from(err: serde_json::Error) -> Self {
        ReqwalkerError::JsonSerialize { source: err }
    }
}

impl From<zip::result::ZipError> for ReqwalkerError {
    fn from(err: zip::result::ZipError) -> Self {
        ReqwalkerError::Archive { source: err }
    }
}

/// Result type alias for reqwalker operations
pub type Result<T> = std::result::Result<T, ReqwalkerError>;
