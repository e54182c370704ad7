//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// reqwalker - requirements.txt generator for Python projects
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "reqwalker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate requirements.txt for a Python project from its imports")]
#[command(long_about = "reqwalker scans a Python project for import statements, separates project-local \
modules from third-party ones, and writes a requirements.txt pinning each third-party distribution \
to its installed version or, failing that, to the latest version on the package index. \
Imports that cannot be resolved are listed unpinned and appended to an unresolved imports log.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Scan the current directory and print the report
    reqwalker

    # Scan a specific project
    reqwalker --path ./my-project

    # Print only the requirements, ready to redirect
    reqwalker --path ./my-project --quiet > requirements.txt

    # Write requirements.txt next to the report
    reqwalker --path ./my-project --requirements-file requirements.txt

Other Sources:
    # Analyze a zipped project
    reqwalker --zip ./upload.zip

    # Download and analyze a repository snapshot
    reqwalker --repo https://github.com/owner/project --branch main

Resolution:
    # Never contact the package index
    reqwalker --offline

    # Read installed versions from a specific environment
    reqwalker --site-packages .venv/lib/python3.12/site-packages

    # Use a custom import-to-package table
    reqwalker --import-map ./imports.json

Output Options:
    # JSON or CSV report
    reqwalker --output json --output-file report.json

    # Local dependency graph in DOT format
    reqwalker --graph-output deps.dot

Configuration:
    # Use a specific configuration file
    reqwalker --config ./reqwalker.toml

    # Create a default configuration file
    reqwalker --init
")]
pub struct Args {
    /// Project directory to scan
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["zip", "repo"], help = "Directory to scan for Python files (defaults to current directory if not specified)")]
    pub path: Option<PathBuf>,

    /// Zip archive containing the project
    #[arg(long, value_name = "FILE", conflicts_with = "repo", help = "Zip archive to extract and analyze instead of a directory")]
    pub zip: Option<PathBuf>,

    /// Repository to download and analyze
    #[arg(long, value_name = "URL", help = "Repository URL whose branch snapshot (<URL>/archive/refs/heads/<BRANCH>.zip) is downloaded and analyzed")]
    pub repo: Option<String>,

    /// Branch of the repository snapshot
    #[arg(long, value_name = "BRANCH", requires = "repo", help = "Branch to download with --repo (default: main)")]
    pub branch: Option<String>,

    /// Exclude files and directories matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for files or directories to skip (can be specified multiple times, e.g., --exclude venv --exclude build)")]
    pub exclude: Vec<String>,

    /// Maximum depth for directory traversal
    #[arg(long, value_name = "DEPTH", help = "Maximum directory depth to traverse")]
    pub max_depth: Option<usize>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Report format: 'text' for human-readable output, 'json' for machine processing, 'csv' for one row per requirement")]
    pub output: Option<OutputFormat>,

    /// Report file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write the report to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// requirements.txt destination
    #[arg(short, long, value_name = "FILE", help = "File to write the generated requirements to")]
    pub requirements_file: Option<PathBuf>,

    /// DOT graph destination
    #[arg(long, value_name = "FILE", help = "Export the local dependency graph to a DOT file")]
    pub graph_output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .reqwalker.toml in the current directory, home or config directory)")]
    pub config: Option<PathBuf>,

    /// Import-to-package table
    #[arg(long, value_name = "FILE", help = "JSON object mapping import names to distribution names (bundled table if not specified)")]
    pub import_map: Option<PathBuf>,

    /// Unresolved imports log
    #[arg(long, value_name = "FILE", help = "Log that unresolved import names are appended to (default: unresolved_imports.log)")]
    pub unresolved_log: Option<PathBuf>,

    /// Package index URL
    #[arg(long, value_name = "URL", help = "Base URL of the package index JSON API (default: https://pypi.org/pypi)")]
    pub index_url: Option<String>,

    /// Index request timeout
    #[arg(long, value_name = "SECONDS", help = "Timeout for each package index request (default: 5)")]
    pub timeout: Option<u64>,

    /// Concurrent lookups
    #[arg(short, long, value_name = "N", help = "Number of concurrent version lookups (default: number of CPUs)")]
    pub jobs: Option<usize>,

    /// Skip the package index
    #[arg(long, help = "Never contact the package index; imports without an installed version stay unpinned")]
    pub offline: bool,

    /// site-packages directories
    #[arg(long, value_name = "DIR", help = "site-packages directory to read installed versions from (can be specified multiple times; auto-detected if not specified)")]
    pub site_packages: Vec<PathBuf>,

    /// Python interpreter
    #[arg(long, value_name = "PYTHON", help = "Python interpreter used to locate site-packages and list standard-library modules")]
    pub python: Option<String>,

    /// Exact local module matching
    #[arg(long, help = "Treat an import as local only when a project file is named exactly <module>.py")]
    pub exact_local_match: bool,

    /// Follow symbolic links during directory traversal
    #[arg(long, help = "Follow symbolic links during directory traversal")]
    pub follow_links: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful for terminals that don't support ANSI colors or for piping output)")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments or when redirecting output)")]
    pub no_progress: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (the text report is reduced to the requirements lines)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, conflicts_with = "quiet", help = "Show per-file and per-module progress and detailed report sections")]
    pub verbose: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.reqwalker.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
