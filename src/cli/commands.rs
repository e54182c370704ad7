//! Command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use super::Args;
use crate::config::{self, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::acquire::{DEFAULT_BRANCH, DOWNLOAD_TIMEOUT};
use crate::core::{download_repository, extract_upload, write_manifest, AcquireOutcome, Analyzer};
use crate::error::{ErrorSeverity, ReqwalkerError, Result};
use crate::models::{AnalysisReport, Settings};
use crate::output::{create_formatter, create_progress_callback, create_writer, write_graph, ProgressReporter};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Generate requirements for a project
    Analyze(Args),
    /// Initialize a default configuration file
    Init,
}

/// Where the project to analyze comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSource {
    /// A directory on disk
    Directory(PathBuf),
    /// A zip archive extracted to a temporary directory
    Zip(PathBuf),
    /// A repository branch snapshot downloaded to a temporary directory
    Repository { url: String, branch: String },
}

impl ProjectSource {
    /// Pick the source named by `args`, falling back to the configured scan path
    pub fn from_args(args: &Args, settings: &Settings) -> Self {
        if let Some(archive) = &args.zip {
            ProjectSource::Zip(archive.clone())
        } else if let Some(url) = &args.repo {
            ProjectSource::Repository {
                url: url.clone(),
                branch: args.branch.clone().unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            }
        } else {
            ProjectSource::Directory(settings.scan_path.clone())
        }
    }
}

/// Project root ready for analysis. Temporary roots are removed on drop.
struct AcquiredProject {
    root: PathBuf,
    _workdir: Option<TempDir>,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        Command::Analyze(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => Self::analyze(args),
            Command::Init => Self::init(Path::new(DEFAULT_CONFIG_FILE)),
        }
    }

    fn analyze(args: &Args) -> Result<()> {
        let settings = config::load_config(CliArgs::from(args))?;

        let reporter = Arc::new(ProgressReporter::new(
            settings.quiet,
            settings.verbose,
            settings.show_progress,
        ));

        reporter.print_verbose(&format!("reqwalker v{}", crate::VERSION));
        reporter.print_verbose(&format!("Settings: {:#?}", settings));

        let source = ProjectSource::from_args(args, &settings);
        let project = Self::acquire(&source, &reporter)?;

        let analyzer = Analyzer::new(&settings)?;
        let report = analyzer.analyze_with_progress(&project.root, create_progress_callback(reporter.clone()))?;
        reporter.finish(&format!(
            "{} requirements from {} files",
            report.summary.requirements, report.summary.files_parsed
        ));

        Self::write_outputs(&report, &settings, &reporter)
    }

    fn acquire(source: &ProjectSource, reporter: &ProgressReporter) -> Result<AcquiredProject> {
        let (workdir, outcome) = match source {
            ProjectSource::Directory(path) => {
                return Ok(AcquiredProject {
                    root: path.clone(),
                    _workdir: None,
                })
            }
            ProjectSource::Zip(archive) => {
                let workdir = TempDir::new()?;
                let outcome = extract_upload(archive, workdir.path());
                (workdir, outcome)
            }
            ProjectSource::Repository { url, branch } => {
                let workdir = TempDir::new()?;
                let spinner = reporter.create_spinner(&format!("Downloading {} ({})", url, branch));
                let outcome = download_repository(url, branch, workdir.path(), DOWNLOAD_TIMEOUT);
                if let Some(spinner) = spinner {
                    spinner.finish_and_clear();
                }
                (workdir, outcome)
            }
        };

        let AcquireOutcome { success, message } = outcome;
        if !success {
            return Err(ReqwalkerError::Acquire { message });
        }
        reporter.print(&message);

        Ok(AcquiredProject {
            root: workdir.path().to_path_buf(),
            _workdir: Some(workdir),
        })
    }

    fn write_outputs(report: &AnalysisReport, settings: &Settings, reporter: &ProgressReporter) -> Result<()> {
        let formatter = create_formatter(settings.output_format, settings.use_colors, settings.verbose, settings.quiet);
        let output = formatter.format(report)?;
        create_writer(settings.output_file.as_ref()).write(&output)?;

        if let Some(path) = &settings.requirements_file {
            write_manifest(path, &report.manifest)?;
            reporter.print(&format!("Requirements written to {}", path.display()));
        }

        if let Some(path) = &settings.graph_output {
            write_graph(path, &report.dependencies)?;
            reporter.print(&format!("Dependency graph written to {}", path.display()));
        }

        Ok(())
    }

    fn init(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            println!("Configuration file already exists at: {}", config_path.display());
            println!("To overwrite it, delete the file first and run this command again.");
            return Ok(());
        }

        config::create_default_config(config_path)?;

        println!("Created default configuration file at: {}", config_path.display());
        println!("\nEvery setting is commented out; uncomment the ones you want to change.");
        println!("Common options:");
        println!("  - exclude_patterns: Glob patterns for files and directories to skip");
        println!("  - site_packages: Environments to read installed versions from");
        println!("  - index_url / timeout_secs: Package index used for the fallback lookup");
        println!("  - requirements_file: Where to write the generated requirements");

        Ok(())
    }

    /// Exit code for an error of `severity`
    pub fn exit_code(severity: ErrorSeverity) -> i32 {
        match severity {
            ErrorSeverity::Warning => 0,
            ErrorSeverity::Error => 1,
            ErrorSeverity::Critical => 2,
        }
    }

    /// Run the command and handle errors
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                Self::exit_code(err.severity())
            }
        }
    }
}
