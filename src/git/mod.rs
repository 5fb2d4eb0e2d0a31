//! git
//!
//! Working tree status through a single interface.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. No other module imports
//! `git2`; the engine consumes status through the [`StatusOracle`] trait.
//!
//! # Responsibilities
//!
//! - Opening a repository at a located root
//! - Snapshotting working tree status
//! - Translating git2 status flags into [`crate::core::types::FileState`]
//!
//! # Example
//!
//! ```ignore
//! use dirtyfmt::git::{Git, StatusOracle};
//! use std::path::Path;
//!
//! let status = Git::default().status(Path::new("/repo"))?;
//! ```

mod interface;
mod oracle;

pub use interface::{Git, Repo};
pub use oracle::{StatusError, StatusOracle};
