//! Configuration handling for taskq
//!
//! Configuration is read from `.taskq.toml` in the working directory
//! (project) and `~/.config/taskq/config.toml` (global). Project values win.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store file used when nothing else is configured
pub const DEFAULT_STORE_FILE: &str = "tasks.json";

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".taskq.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings from a single config file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    /// Path to the JSON task store
    pub store_file: Option<PathBuf>,

    /// Default output format (text or json)
    pub default_format: Option<OutputFormat>,
}

impl FileConfig {
    /// Reads a config file; a missing file is an empty config
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: FileConfig,
    pub global: FileConfig,
    /// Directory the project config was resolved against
    pub base_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration for the current directory
    pub fn load() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().ok();
        let global = match Self::global_config_path() {
            Some(path) => FileConfig::read(&path)?,
            None => FileConfig::default(),
        };
        let project = match &cwd {
            Some(dir) => FileConfig::read(&dir.join(PROJECT_CONFIG_FILE))?,
            None => FileConfig::default(),
        };

        Ok(Self {
            project,
            global,
            base_dir: cwd,
        })
    }

    /// Loads configuration from explicit paths
    pub fn from_paths(project: &Path, global: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self {
            project: FileConfig::read(project)?,
            global: match global {
                Some(path) => FileConfig::read(path)?,
                None => FileConfig::default(),
            },
            base_dir: project.parent().map(Path::to_path_buf),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "taskq", "taskq").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Resolves the store file: explicit override, project, global, default
    ///
    /// Relative project paths are taken from the project config's directory.
    pub fn store_file(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        if let Some(path) = &self.project.store_file {
            return match &self.base_dir {
                Some(base) if path.is_relative() => base.join(path),
                _ => path.clone(),
            };
        }

        self.global
            .store_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }

    /// Default output format when no flag is given
    pub fn default_format(&self) -> OutputFormat {
        self.project
            .default_format
            .or(self.global.default_format)
            .unwrap_or_default()
    }
}
