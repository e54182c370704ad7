//! Settings validation

use std::path::Path;

use super::parser::is_http_url;
use crate::error::{ReqwalkerError, Result, ResultExt};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.scan_path.is_dir() {
            return Err(ReqwalkerError::invalid_path(&settings.scan_path));
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern).with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }

        if settings.max_depth == Some(0) {
            return Err(ReqwalkerError::config_error("Max depth must be at least 1"));
        }

        if settings.jobs == 0 {
            return Err(ReqwalkerError::config_error("Jobs must be at least 1"));
        }

        if settings.timeout_secs == 0 {
            return Err(ReqwalkerError::config_error("Timeout must be at least 1 second"));
        }

        if !is_http_url(&settings.index_url) {
            return Err(ReqwalkerError::config_error(format!(
                "Index URL must start with http:// or https://: {}",
                settings.index_url
            )));
        }

        let outputs = [
            settings.output_file.as_deref(),
            settings.requirements_file.as_deref(),
            settings.graph_output.as_deref(),
            Some(settings.unresolved_log.as_path()),
        ];
        for path in outputs.into_iter().flatten() {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that an output path is writable
    fn validate_output_path(path: &Path) -> Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        if !parent.exists() {
            return Err(ReqwalkerError::invalid_path(parent));
        }

        // Best-effort check of the owner write bit
        let metadata = std::fs::metadata(parent).map_err(ReqwalkerError::io_error)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o200 == 0 {
                return Err(ReqwalkerError::permission_denied(parent));
            }
        }
        #[cfg(not(unix))]
        {
            if metadata.permissions().readonly() {
                return Err(ReqwalkerError::permission_denied(parent));
            }
        }

        Ok(())
    }
}
