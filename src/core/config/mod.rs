//! core::config
//!
//! Configuration loading.
//!
//! # Overview
//!
//! dirtyfmt has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$DIRTYFMT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/dirtyfmt/config.toml`
//! 3. `~/.dirtyfmt/config.toml`
//!
//! # Repo Config Locations
//!
//! Searched in order:
//! 1. `.git/dirtyfmt/config.toml` (canonical, local to the clone)
//! 2. `.dirtyfmt.toml` at the repository root (checked in)
//!
//! # Example
//!
//! ```no_run
//! use dirtyfmt::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! let config = result.config;
//! println!("indent: {}", config.indent());
//! ```

pub mod schema;

pub use schema::{ConfigFile, MAX_INDENT, MAX_JOBS};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::format::json::DEFAULT_INDENT;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "DIRTYFMT_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence and defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ConfigFile,
    /// Repository configuration (if present)
    pub repo: Option<ConfigFile>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Build a configuration from already-parsed files.
    pub fn new(global: ConfigFile, repo: Option<ConfigFile>) -> Self {
        Self {
            global,
            repo,
            global_path: None,
            repo_path: None,
        }
    }

    /// Load configuration from default locations.
    ///
    /// If `repo_root` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(repo_root: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_file = Self::global_candidates().into_iter().find(|p| p.exists());
        Self::load_from(global_file.as_deref(), repo_root)
    }

    /// Load configuration from an explicit global file and repository root.
    pub fn load_from(
        global_file: Option<&Path>,
        repo_root: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let global = match global_file {
            Some(path) => Self::read_config(path)?,
            None => ConfigFile::default(),
        };

        let (repo, repo_path) = match repo_root {
            Some(root) => Self::load_repo(root, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path: global_file.map(Path::to_path_buf),
                repo_path,
            },
            warnings,
        })
    }

    /// Global config locations in search order.
    fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("dirtyfmt/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".dirtyfmt/config.toml"));
        }
        candidates
    }

    /// Load repository configuration from standard locations.
    fn load_repo(
        repo_root: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<ConfigFile>, Option<PathBuf>), ConfigError> {
        let canonical = Self::repo_config_path(repo_root);
        let checked_in = repo_root.join(".dirtyfmt.toml");

        if canonical.exists() {
            if checked_in.exists() {
                warnings.push(ConfigWarning {
                    message: format!(
                        "ignoring '{}' because '{}' takes precedence",
                        checked_in.display(),
                        canonical.display()
                    ),
                    path: checked_in,
                });
            }
            let config = Self::read_config(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        if checked_in.exists() {
            let config = Self::read_config(&checked_in)?;
            return Ok((Some(config), Some(checked_in)));
        }

        Ok((None, None))
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Canonical repo config path: `.git/dirtyfmt/config.toml` under the root.
    pub fn repo_config_path(repo_root: &Path) -> PathBuf {
        repo_root.join(".git/dirtyfmt/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn effective(&self) -> ConfigFile {
        match &self.repo {
            Some(repo) => self.global.merged(repo),
            None => self.global.clone(),
        }
    }

    /// Configured worker count, if any.
    pub fn jobs(&self) -> Option<usize> {
        self.effective().jobs
    }

    /// Whether untracked files are formatted.
    ///
    /// Defaults to `true` if not configured.
    pub fn include_untracked(&self) -> bool {
        self.effective().include_untracked.unwrap_or(true)
    }

    /// JSON indentation width.
    ///
    /// Defaults to 2 if not configured.
    pub fn indent(&self) -> usize {
        self.effective().indent.unwrap_or(DEFAULT_INDENT)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}
