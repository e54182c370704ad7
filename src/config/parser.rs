//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{ReqwalkerError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReqwalkerError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ReqwalkerError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| ReqwalkerError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();
    let invalid = |what: String| ReqwalkerError::config_error(format!("{} in config file: {}", what, path.display()));

    let non_empty_paths = [
        ("scan_path", settings.scan_path.as_ref()),
        ("output_file", settings.output_file.as_ref()),
        ("requirements_file", settings.requirements_file.as_ref()),
        ("graph_output", settings.graph_output.as_ref()),
        ("import_map", settings.import_map.as_ref()),
        ("unresolved_log", settings.unresolved_log.as_ref()),
    ];
    for (key, value) in non_empty_paths {
        if value.is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(invalid(format!("Invalid empty {}", key)));
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(invalid("Empty exclude pattern".to_string()));
            }

            glob::Pattern::new(pattern)
                .map_err(|e| invalid(format!("Invalid exclude pattern '{}' ({})", pattern, e)))?;
        }
    }

    if settings.max_depth == Some(0) {
        return Err(invalid("Invalid max_depth 0 (must be at least 1)".to_string()));
    }
    if settings.jobs == Some(0) {
        return Err(invalid("Invalid jobs 0 (must be at least 1)".to_string()));
    }
    if settings.timeout_secs == Some(0) {
        return Err(invalid("Invalid timeout_secs 0 (must be at least 1)".to_string()));
    }

    if let Some(url) = &settings.index_url {
        if !is_http_url(url) {
            return Err(invalid(format!("Invalid index_url '{}'", url)));
        }
    }

    Ok(())
}

/// Whether `url` is an http or https URL
pub(crate) fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty())
}

/// Candidate default configuration files, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];

    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }

    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("reqwalker").join("config.toml"));
    }

    locations
}

/// First default location holding a configuration file
pub fn find_default_config_file() -> Option<PathBuf> {
    default_config_locations().into_iter().find(|path| path.is_file())
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(ReqwalkerError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");

    fs::write(path, default_config).map_err(ReqwalkerError::io_error)?;

    Ok(())
}
