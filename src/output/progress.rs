//! Progress reporting functionality
//!
//! Progress bars and status lines go to stderr so stdout carries only the
//! report. Quiet mode suppresses everything but warnings and errors.

use crate::core::analyzer::AnalysisPhase;
use crate::core::parallel::ProgressUpdate;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    multi_progress: Arc<MultiProgress>,
    main_progress_bar: Option<ProgressBar>,
    current_operation: Mutex<String>,
}

impl ProgressReporter {
    /// Create a new progress reporter. `show_bars` turns the bars off while keeping messages.
    pub fn new(quiet: bool, verbose: bool, show_bars: bool) -> Self {
        let multi_progress = Arc::new(MultiProgress::new());

        // Verbose lines replace the bar; both on stderr would interleave
        let main_progress_bar = if quiet || verbose || !show_bars {
            None
        } else {
            let bar = multi_progress.add(ProgressBar::new(0));
            bar.set_style(
                ProgressStyle::with_template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(bar)
        };

        Self {
            quiet,
            verbose,
            multi_progress,
            main_progress_bar,
            current_operation: Mutex::new(String::new()),
        }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
            bar.set_message(operation.to_string());
        }

        *self.current_operation.lock() = operation.to_string();

        if self.verbose {
            eprintln!("Starting: {}", operation);
        }
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
            bar.set_message(message.to_string());
        }

        if self.verbose {
            eprintln!("[{}/{}] {}", current, total, message);
        }
    }

    /// Update progress from a ProgressUpdate
    pub fn update_from(&self, progress: ProgressUpdate) {
        self.update(progress.current, progress.total, &progress.message);
    }

    /// Update progress for an analysis phase, restarting the bar when the phase changes
    pub fn update_phase(&self, phase: AnalysisPhase, progress: ProgressUpdate) {
        let operation = phase.to_string();
        let changed = *self.current_operation.lock() != operation;
        if changed {
            self.start(progress.total, &operation);
        }

        let message = format!("{}: {}", operation, progress.message);
        self.update(progress.current, progress.total, &message);
    }

    /// Finish the progress operation
    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(bar) = &self.main_progress_bar {
            bar.finish_and_clear();
        }

        if self.verbose {
            eprintln!("Finished: {}", message);
        }
    }

    /// Create a spinner for an operation of unknown length
    pub fn create_spinner(&self, message: &str) -> Option<ProgressBar> {
        if self.quiet || self.main_progress_bar.is_none() {
            return None;
        }

        let spinner = self.multi_progress.add(ProgressBar::new_spinner());
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        Some(spinner)
    }

    /// Print a status message (respects quiet mode)
    pub fn print(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    /// Print a verbose message (only in verbose mode)
    pub fn print_verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("{}", message);
        }
    }

    /// Print a warning message (always printed, even in quiet mode)
    pub fn print_warning(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    /// Print an error message (always printed, even in quiet mode)
    pub fn print_error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Create an analysis progress callback that updates a ProgressReporter
pub fn create_progress_callback(
    reporter: Arc<ProgressReporter>,
) -> impl Fn(AnalysisPhase, ProgressUpdate) + Send + Sync {
    move |phase, progress| reporter.update_phase(phase, progress)
}
