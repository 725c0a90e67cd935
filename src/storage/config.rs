//! Configuration handling for prereq
//!
//! Configuration is read from `.prereq.toml` (project, found by walking up
//! from the working directory) and `~/.config/prereq/config.toml` (global).
//! Project values override global ones field by field; command-line flags
//! override both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::domain::KeyOrder;

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".prereq.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// One configuration file; unset fields fall through to the next layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Output format when `--format` is not given
    pub default_format: Option<OutputFormat>,

    /// Comparator used to order graph keys
    pub key_order: Option<KeyOrder>,

    /// Print an order even when the graph has a cycle
    pub allow_cycles: Option<bool>,
}

impl ConfigFile {
    /// Overlays `other` on top of `self`
    pub fn merge(self, other: ConfigFile) -> ConfigFile {
        ConfigFile {
            default_format: other.default_format.or(self.default_format),
            key_order: other.key_order.or(self.key_order),
            allow_cycles: other.allow_cycles.or(self.allow_cycles),
        }
    }

    /// Reads a configuration file
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

/// Effective configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub default_format: OutputFormat,
    pub key_order: KeyOrder,
    pub allow_cycles: bool,
    /// Project file that was applied, if any
    pub project_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    ///
    /// An explicit path replaces the project file lookup.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let global = match Self::global_config_path() {
            Some(path) if path.is_file() => ConfigFile::read(&path)?,
            _ => ConfigFile::default(),
        };

        let project_file = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|dir| Self::find_project_config(&dir)),
        };

        let project = match &project_file {
            Some(path) => ConfigFile::read(path)?,
            None => ConfigFile::default(),
        };

        Ok(Self::from_layers(global, project, project_file))
    }

    /// Builds the effective configuration from global and project layers
    pub fn from_layers(global: ConfigFile, project: ConfigFile, project_file: Option<PathBuf>) -> Self {
        let merged = global.merge(project);
        Self {
            default_format: merged.default_format.unwrap_or_default(),
            key_order: merged.key_order.unwrap_or_default(),
            allow_cycles: merged.allow_cycles.unwrap_or(false),
            project_file,
        }
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "prereq", "prereq").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Finds `.prereq.toml` in `start` or the nearest parent holding one
    pub fn find_project_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}
