//! engine
//!
//! Orchestrates one formatting run: Locate -> Status -> Fan-out -> Report.
//!
//! # Architecture
//!
//! 1. **Locate**: find the repository root above the working directory
//! 2. **Status**: snapshot pending changes once through a [`StatusOracle`]
//! 3. **Fan-out**: process every entry independently ([`process`])
//! 4. **Report**: stream outcomes as they complete, then return a
//!    [`RunReport`]
//!
//! # Invariants
//!
//! - The status snapshot is taken once and never re-queried
//! - Every entry produces exactly one outcome
//! - Per-file failures never abort the run; run-level failures abort it
//!   before any file is touched
//!
//! # Example
//!
//! ```ignore
//! use dirtyfmt::engine::{self, RunOptions};
//! use dirtyfmt::format::JsonFormatter;
//! use dirtyfmt::git::Git;
//! use dirtyfmt::ui::output::{ConsoleReporter, Verbosity};
//! use std::sync::Arc;
//!
//! let root = engine::locate(&std::env::current_dir()?)?;
//! let report = engine::run(
//!     &root,
//!     &RunOptions::default(),
//!     &Git::default(),
//!     Arc::new(JsonFormatter::default()),
//!     &ConsoleReporter::new(Verbosity::Normal),
//! )?;
//! std::process::exit(if report.is_success() { 0 } else { 1 });
//! ```

pub mod process;
pub mod runner;

pub use process::process_entry;
pub use runner::{run, run_async};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::locate::{find_repository_root, LocateError};
use crate::git::StatusError;

/// Run-level failures. Any of these aborts the run before files are
/// processed.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Status(#[from] StatusError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot start worker runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Options for one run, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum number of files processed at once (at least 1)
    pub jobs: usize,
    /// Report what would change without writing
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            dry_run: false,
        }
    }
}

/// Default worker count: the available parallelism, or 1 if unknown.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Locate the repository root at or above `cwd`.
pub fn locate(cwd: &Path) -> Result<PathBuf, RunError> {
    Ok(find_repository_root(cwd)?)
}
