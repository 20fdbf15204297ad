//! Configuration System
//!
//! Layered configuration built with the `config` crate. Sources, lowest
//! precedence first:
//!
//! 1. Built-in defaults
//! 2. The global file `$XDG_CONFIG_HOME/treecmp/config.toml`, or an explicit file
//! 3. Environment variables `TREECMP__<SECTION>__<KEY>`
//!
//! CLI flags are applied on top by the binary.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreecmpConfig {
    #[serde(default)]
    pub compare: CompareConfig,

    #[serde(default)]
    pub backup_check: BackupCheckConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Comparison defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Suppress differences that consist only of a modification time
    #[serde(default)]
    pub ignore_mtime: bool,

    /// Skip "only in" reports for paths the backup tool excludes
    #[serde(default)]
    pub skip_backup_excluded: bool,

    /// Exclusion rule file
    #[serde(default)]
    pub exclude_file: Option<PathBuf>,
}

/// External command used to ask the backup tool about a path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupCheckConfig {
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the path
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Output prefix meaning "excluded"
    #[serde(default = "default_excluded_marker")]
    pub excluded_marker: String,
}

fn default_program() -> String {
    "tmutil".to_string()
}

fn default_args() -> Vec<String> {
    vec!["isexcluded".to_string()]
}

fn default_excluded_marker() -> String {
    "[Excluded]".to_string()
}

impl Default for BackupCheckConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            excluded_marker: default_excluded_marker(),
        }
    }
}

impl TreecmpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backup_check.program.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "backup_check.program must not be empty".to_string(),
            ));
        }
        if self.backup_check.excluded_marker.is_empty() {
            return Err(ConfigError::Invalid(
                "backup_check.excluded_marker must not be empty".to_string(),
            ));
        }
        self.logging.validate()
    }
}

/// Path to the global config file
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treecmp").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads [`TreecmpConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the global config file (if present) and the environment
    pub fn load() -> Result<TreecmpConfig, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = global_config_path() {
            debug!(config_path = %path.display(), "Checking global config file");
            builder = builder.add_source(File::from(path).required(false));
        }
        Self::finish(builder)
    }

    /// Load from an explicit file, which must exist, and the environment
    pub fn load_from_file(path: &Path) -> Result<TreecmpConfig, ConfigError> {
        let builder = Config::builder().add_source(File::from(path).required(true));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<TreecmpConfig, ConfigError> {
        let config: TreecmpConfig = builder
            .add_source(
                Environment::with_prefix("TREECMP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}
