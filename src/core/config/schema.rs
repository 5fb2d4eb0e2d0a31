//! core::config::schema
//!
//! Configuration file schema.
//!
//! The global and repository scopes share one schema; a key set in the repo
//! file overrides the same key in the global file.
//!
//! # Validation
//!
//! Values are validated after parsing (e.g. `jobs` must be between 1 and
//! [`MAX_JOBS`]).

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Largest accepted number of concurrent file workers.
pub const MAX_JOBS: usize = 4096;

/// Largest accepted JSON indentation width.
pub const MAX_INDENT: usize = 16;

/// Contents of one configuration file.
///
/// # Example
///
/// ```toml
/// jobs = 8
/// include_untracked = true
/// indent = 2
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Number of files formatted concurrently
    pub jobs: Option<usize>,

    /// Whether untracked files are formatted
    pub include_untracked: Option<bool>,

    /// JSON indentation width in spaces
    pub indent: Option<usize>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(jobs) = self.jobs {
            if jobs == 0 || jobs > MAX_JOBS {
                return Err(ConfigError::InvalidValue(format!(
                    "jobs must be between 1 and {}, got {}",
                    MAX_JOBS, jobs
                )));
            }
        }

        if let Some(indent) = self.indent {
            if indent == 0 || indent > MAX_INDENT {
                return Err(ConfigError::InvalidValue(format!(
                    "indent must be between 1 and {}, got {}",
                    MAX_INDENT, indent
                )));
            }
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`; keys set in `other` win.
    pub fn merged(&self, other: &ConfigFile) -> ConfigFile {
        ConfigFile {
            jobs: other.jobs.or(self.jobs),
            include_untracked: other.include_untracked.or(self.include_untracked),
            indent: other.indent.or(self.indent),
        }
    }
}
