//! core::locate
//!
//! Repository root discovery.
//!
//! Walks from a starting directory towards the filesystem root and stops at
//! the first directory containing a `.git` entry. The entry may be a
//! directory (normal repositories) or a file (linked worktrees and
//! submodules), so only its existence is checked.
//!
//! # Example
//!
//! ```no_run
//! use dirtyfmt::core::locate::find_repository_root;
//! use std::path::Path;
//!
//! let root = find_repository_root(Path::new("/repo/src/nested")).unwrap();
//! assert_eq!(root, Path::new("/repo"));
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name of the metadata entry that marks a repository root.
pub const GIT_MARKER: &str = ".git";

/// Errors from repository discovery.
#[derive(Debug, Error)]
pub enum LocateError {
    /// The filesystem root was reached without finding a marker.
    #[error("did not find Git repository from filesystem root to {}", .start.display())]
    RepositoryNotFound {
        /// Directory the search started from
        start: PathBuf,
    },

    /// The starting directory could not be made absolute.
    #[error("cannot resolve working directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Find the repository root at or above `start`.
///
/// A relative `start` is resolved against the process working directory.
/// The walk terminates when a directory has no parent; that case is
/// reported as [`LocateError::RepositoryNotFound`].
pub fn find_repository_root(start: &Path) -> Result<PathBuf, LocateError> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(LocateError::CurrentDir)?
            .join(start)
    };

    let mut dir = start.as_path();
    loop {
        if dir.join(GIT_MARKER).exists() {
            log::debug!("repository root: {}", dir.display());
            return Ok(dir.to_path_buf());
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(LocateError::RepositoryNotFound {
                    start: start.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_marker_in_start_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(GIT_MARKER)).unwrap();

        let root = find_repository_root(dir.path()).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn finds_marker_in_ancestor() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(GIT_MARKER)).unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let root = find_repository_root(&nested).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn nearest_marker_wins() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(GIT_MARKER)).unwrap();
        let inner = dir.path().join("vendor/lib");
        fs::create_dir_all(inner.join(GIT_MARKER)).unwrap();
        let nested = inner.join("src");
        fs::create_dir_all(&nested).unwrap();

        let root = find_repository_root(&nested).unwrap();
        assert_eq!(root, inner);
    }

    #[test]
    fn marker_file_counts() {
        // Linked worktrees use a `.git` file pointing at the real git dir.
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(GIT_MARKER), "gitdir: /elsewhere\n").unwrap();

        let root = find_repository_root(dir.path()).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn filesystem_root_terminates_search() {
        // Only meaningful when no ancestor of the temp dir is a repository.
        let dir = TempDir::new().unwrap();
        if dir.path().ancestors().any(|a| a.join(GIT_MARKER).exists()) {
            return;
        }

        let err = find_repository_root(dir.path()).unwrap_err();
        match err {
            LocateError::RepositoryNotFound { start } => assert_eq!(start, dir.path()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn not_found_message_names_start() {
        let err = LocateError::RepositoryNotFound {
            start: PathBuf::from("/tmp/somewhere"),
        };
        assert_eq!(
            err.to_string(),
            "did not find Git repository from filesystem root to /tmp/somewhere"
        );
    }
}
