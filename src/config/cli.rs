//! Command-line argument configuration source

use std::path::PathBuf;

use super::{ConfigSource, CLI_PRIORITY};
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    priority: u8,
}

/// The settings-bearing subset of the command-line arguments
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub requirements_file: Option<PathBuf>,
    pub graph_output: Option<PathBuf>,
    pub import_map: Option<PathBuf>,
    pub unresolved_log: Option<PathBuf>,
    pub index_url: Option<String>,
    pub timeout: Option<u64>,
    pub jobs: Option<usize>,
    pub offline: bool,
    pub site_packages: Option<Vec<PathBuf>>,
    pub python: Option<String>,
    pub exact_local_match: bool,
    pub follow_links: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Csv => OutputFormat::Csv,
        }
    }
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        let non_empty = |v: &Vec<_>| if v.is_empty() { None } else { Some(v.clone()) };

        CliArgs {
            path: args.path.clone(),
            exclude: non_empty(&args.exclude),
            max_depth: args.max_depth,
            output_format: args.output.map(OutputFormat::from),
            output_file: args.output_file.clone(),
            requirements_file: args.requirements_file.clone(),
            graph_output: args.graph_output.clone(),
            import_map: args.import_map.clone(),
            unresolved_log: args.unresolved_log.clone(),
            index_url: args.index_url.clone(),
            timeout: args.timeout,
            jobs: args.jobs,
            offline: args.offline,
            site_packages: if args.site_packages.is_empty() {
                None
            } else {
                Some(args.site_packages.clone())
            },
            python: args.python.clone(),
            exact_local_match: args.exact_local_match,
            follow_links: args.follow_links,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            quiet: args.quiet,
            verbose: args.verbose,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            priority: CLI_PRIORITY,
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;

        // Flags only ever switch a behaviour on, so an absent flag leaves
        // the lower-priority sources in charge
        let flag = |set: bool, value: bool| if set { Some(value) } else { None };

        Ok(PartialSettings {
            scan_path: args.path.clone(),
            exclude_patterns: args.exclude.clone(),
            max_depth: args.max_depth,
            follow_links: flag(args.follow_links, true),
            exact_local_match: flag(args.exact_local_match, true),
            import_map: args.import_map.clone(),
            unresolved_log: args.unresolved_log.clone(),
            index_url: args.index_url.clone(),
            timeout_secs: args.timeout,
            jobs: args.jobs,
            offline: flag(args.offline, true),
            site_packages: args.site_packages.clone(),
            python: args.python.clone(),
            output_format: args.output_format,
            output_file: args.output_file.clone(),
            requirements_file: args.requirements_file.clone(),
            graph_output: args.graph_output.clone(),
            quiet: flag(args.quiet, true),
            verbose: flag(args.verbose, true),
            use_colors: flag(args.no_colors, false),
            show_progress: flag(args.no_progress, false),
        })
    }

    fn is_available(&self) -> bool {
        // CLI args are always available
        true
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
