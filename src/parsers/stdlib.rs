//! Standard-library module classification
//!
//! The set of built-in module names depends on the Python version and
//! platform. A table taken from CPython's `sys.stdlib_module_names` is bundled;
//! when an interpreter is configured its own list is used instead.

use crate::error::{ReqwalkerError, Result};
use std::collections::HashSet;
use std::process::Command;

const BUNDLED_STDLIB: &str = include_str!("../../data/stdlib_modules.txt");

const STDLIB_QUERY: &str = "import sys; print('\\n'.join(sorted(sys.stdlib_module_names)))";

/// Membership test against a set of standard-library module names
#[derive(Debug, Clone)]
pub struct StdlibClassifier {
    modules: HashSet<String>,
}

impl StdlibClassifier {
    /// Classifier backed by the bundled module table
    pub fn bundled() -> Self {
        Self::from_lines(BUNDLED_STDLIB)
    }

    /// Ask `python` for its `sys.stdlib_module_names`.
    ///
    /// Requires Python 3.10 or newer.
    pub fn from_interpreter(python: &str) -> Result<Self> {
        let output = Command::new(python)
            .args(["-c", STDLIB_QUERY])
            .output()
            .map_err(|e| {
                ReqwalkerError::config_error(format!("Failed to run interpreter '{}': {}", python, e))
            })?;

        if !output.status.success() {
            return Err(ReqwalkerError::config_error(format!(
                "Interpreter '{}' could not list stdlib modules: {}",
                python,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let classifier = Self::from_lines(&String::from_utf8_lossy(&output.stdout));
        if classifier.modules.is_empty() {
            return Err(ReqwalkerError::config_error(format!(
                "Interpreter '{}' reported no stdlib modules",
                python
            )));
        }

        Ok(classifier)
    }

    /// Use the configured interpreter when there is one, the bundled table otherwise
    pub fn detect(python: Option<&str>) -> Self {
        match python {
            Some(python) => Self::from_interpreter(python).unwrap_or_else(|err| {
                crate::error::warn(format!("{}. Using the bundled stdlib table.", err.user_message()));
                Self::bundled()
            }),
            None => Self::bundled(),
        }
    }

    /// Classifier over an explicit list of module names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modules: names.into_iter().map(Into::into).collect(),
        }
    }

    fn from_lines(text: &str) -> Self {
        Self::from_names(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    /// Whether `module_name` is a standard-library module
    pub fn is_stdlib(&self, module_name: &str) -> bool {
        self.modules.contains(module_name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for StdlibClassifier {
    fn default() -> Self {
        Self::bundled()
    }
}
