//! git::oracle
//!
//! The status oracle contract consumed by the engine.
//!
//! The engine only needs one question answered: which paths under a
//! repository root have pending changes, and in what state. Keeping that
//! behind a trait lets the engine run against fake oracles in tests.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::StatusMap;

/// Errors from status queries.
#[derive(Debug, Error)]
pub enum StatusError {
    /// The repository could not be opened.
    #[error("cannot open repository at {}: {message}", .path.display())]
    Open {
        /// Repository root that was opened
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// Status enumeration failed.
    #[error("cannot read working tree status: {message}")]
    Query {
        /// Underlying error message
        message: String,
    },
}

/// Source of working-tree status snapshots.
pub trait StatusOracle: Send + Sync {
    /// Return every path under `root` with pending changes.
    ///
    /// The returned map is a snapshot; callers treat it as authoritative for
    /// the rest of the run.
    fn status(&self, root: &Path) -> Result<StatusMap, StatusError>;
}
