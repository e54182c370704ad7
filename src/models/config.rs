//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default package index endpoint (`{index_url}/{package}/json`)
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

/// Default location of the unresolved imports log, relative to the working directory
pub const DEFAULT_UNRESOLVED_LOG: &str = "unresolved_imports.log";

/// Main configuration settings for reqwalker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Project root to scan for Python sources
    pub scan_path: PathBuf,

    /// Glob patterns for files and directories to skip
    pub exclude_patterns: Vec<String>,

    /// Maximum directory depth to traverse
    pub max_depth: Option<usize>,

    /// Whether to follow symbolic links during directory traversal
    pub follow_links: bool,

    /// Match local modules by exact file stem instead of substring
    pub exact_local_match: bool,

    /// Import-to-package table (bundled table when unset)
    pub import_map: Option<PathBuf>,

    /// Append-only log for imports whose version could not be resolved
    pub unresolved_log: PathBuf,

    /// Package index JSON API base URL
    pub index_url: String,

    /// Timeout in seconds for each package index request
    pub timeout_secs: u64,

    /// Number of workers used for version resolution
    pub jobs: usize,

    /// Skip the package index entirely
    pub offline: bool,

    /// site-packages directories to read installed metadata from (auto-detected when empty)
    pub site_packages: Vec<PathBuf>,

    /// Python interpreter used to locate site-packages and the stdlib module list
    pub python: Option<String>,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Report file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Where to write the generated requirements.txt
    pub requirements_file: Option<PathBuf>,

    /// Where to write the dependency graph in DOT format
    pub graph_output: Option<PathBuf>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_path: PathBuf::from("."),
            exclude_patterns: vec![
                ".git".to_string(),
                "__pycache__".to_string(),
            ],
            max_depth: None,
            follow_links: false,
            exact_local_match: false,
            import_map: None,
            unresolved_log: PathBuf::from(DEFAULT_UNRESOLVED_LOG),
            index_url: DEFAULT_INDEX_URL.to_string(),
            timeout_secs: 5,
            jobs: num_cpus::get(),
            offline: false,
            site_packages: Vec::new(),
            python: None,
            output_format: OutputFormat::Text,
            output_file: None,
            requirements_file: None,
            graph_output: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output, one row per requirement
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub scan_path: Option<PathBuf>,
    pub exclude_patterns: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub follow_links: Option<bool>,
    pub exact_local_match: Option<bool>,
    pub import_map: Option<PathBuf>,
    pub unresolved_log: Option<PathBuf>,
    pub index_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub jobs: Option<usize>,
    pub offline: Option<bool>,
    pub site_packages: Option<Vec<PathBuf>>,
    pub python: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub requirements_file: Option<PathBuf>,
    pub graph_output: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            };
        }

        take!(
            scan_path,
            exclude_patterns,
            max_depth,
            follow_links,
            exact_local_match,
            import_map,
            unresolved_log,
            index_url,
            timeout_secs,
            jobs,
            offline,
            site_packages,
            python,
            output_format,
            output_file,
            requirements_file,
            graph_output,
            quiet,
            verbose,
            use_colors,
            show_progress,
        );
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(scan_path) = &self.scan_path {
            settings.scan_path = scan_path.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = Some(max_depth);
        }
        if let Some(follow_links) = self.follow_links {
            settings.follow_links = follow_links;
        }
        if let Some(exact_local_match) = self.exact_local_match {
            settings.exact_local_match = exact_local_match;
        }
        if let Some(import_map) = &self.import_map {
            settings.import_map = Some(import_map.clone());
        }
        if let Some(unresolved_log) = &self.unresolved_log {
            settings.unresolved_log = unresolved_log.clone();
        }
        if let Some(index_url) = &self.index_url {
            settings.index_url = index_url.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            settings.timeout_secs = timeout_secs;
        }
        if let Some(jobs) = self.jobs {
            settings.jobs = jobs;
        }
        if let Some(offline) = self.offline {
            settings.offline = offline;
        }
        if let Some(site_packages) = &self.site_packages {
            settings.site_packages = site_packages.clone();
        }
        if let Some(python) = &self.python {
            settings.python = Some(python.clone());
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(requirements_file) = &self.requirements_file {
            settings.requirements_file = Some(requirements_file.clone());
        }
        if let Some(graph_output) = &self.graph_output {
            settings.graph_output = Some(graph_output.clone());
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
