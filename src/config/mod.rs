//! Configuration management
//!
//! Settings are layered from several sources. Later sources win:
//! built-in defaults, then a configuration file (explicit `--config` or the
//! first `.reqwalker.toml` found in the default locations), then
//! `REQWALKER_*` environment variables, then command-line arguments.

pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;

use crate::error::{ReqwalkerError, Result};
use crate::models::config::{PartialSettings, Settings};

pub use cli::{CliArgs, CliConfig};
pub use file::{EnvConfig, FileConfig, DEFAULT_CONFIG_FILE};
pub use parser::{create_default_config, find_default_config_file, parse_config_content, parse_config_file};
pub use settings::SettingsValidator;

/// Prefix of the environment variables read by [`load_config`]
pub const ENV_PREFIX: &str = "REQWALKER";

/// Priority of configuration files
pub const FILE_PRIORITY: u8 = 10;
/// Priority of `REQWALKER_*` environment variables
pub const ENV_PRIORITY: u8 = 20;
/// Priority of command-line arguments
pub const CLI_PRIORITY: u8 = 30;

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<PartialSettings>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Get the priority of this source (higher numbers take precedence)
    fn priority(&self) -> u8 {
        FILE_PRIORITY
    }
}

/// Configuration builder for merging multiple sources
pub struct ConfigBuilder {
    partial: PartialSettings,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            partial: PartialSettings::default(),
        }
    }

    /// Merge settings from a partial configuration
    pub fn merge(mut self, partial: PartialSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    /// Load and merge settings from a configuration source
    pub fn load_from<S: ConfigSource + ?Sized>(self, source: &S) -> Result<Self> {
        if source.is_available() {
            Ok(self.merge(source.load()?))
        } else {
            Ok(self)
        }
    }

    /// Merge every source, lowest priority first, whatever order they are given in
    pub fn load_sources(self, mut sources: Vec<Box<dyn ConfigSource>>) -> Result<Self> {
        sources.sort_by_key(|source| source.priority());
        sources
            .iter()
            .try_fold(self, |builder, source| builder.load_from(source.as_ref()))
    }

    /// Build the final settings with validation
    pub fn build(self) -> Result<Settings> {
        let settings = self.partial.to_settings();
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from every source with the standard precedence
pub fn load_config(cli_args: CliArgs) -> Result<Settings> {
    load_config_with_env_prefix(cli_args, ENV_PREFIX)
}

/// Load configuration with a custom environment variable prefix
pub fn load_config_with_env_prefix(cli_args: CliArgs, env_prefix: &str) -> Result<Settings> {
    let file_config = match &cli_args.config {
        Some(path) => {
            let file_config = FileConfig::with_path(path);
            // An explicitly requested file must exist
            if !file_config.is_available() {
                return Err(ReqwalkerError::ConfigNotFound { path: path.clone() });
            }
            Some(file_config)
        }
        None => parser::find_default_config_file().map(FileConfig::with_path),
    };

    let mut sources: Vec<Box<dyn ConfigSource>> = vec![
        Box::new(CliConfig::new(cli_args)),
        Box::new(EnvConfig::new(env_prefix)),
    ];
    if let Some(file_config) = file_config {
        sources.push(Box::new(file_config));
    }

    ConfigBuilder::new().load_sources(sources)?.build()
}
