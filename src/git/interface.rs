//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the only place that imports `git2`. It opens a repository
//! at an already-located root and translates `git2` status flags into the
//! crate's [`StatusEntry`] model.
//!
//! # Example
//!
//! ```ignore
//! use dirtyfmt::git::{Git, StatusOracle};
//! use std::path::Path;
//!
//! let git = Git::new(true);
//! for (path, entry) in git.status(Path::new("/repo"))? {
//!     println!("{entry}");
//! }
//! ```

use std::path::{Path, PathBuf};

use super::oracle::{StatusError, StatusOracle};
use crate::core::types::{FileState, StatusEntry, StatusMap};

/// An open repository with a working directory.
pub struct Repo {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Repo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repo")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Repo {
    /// Open the repository rooted at `root`.
    ///
    /// Unlike discovery, this does not search parent directories; `root`
    /// must already be the repository root.
    ///
    /// # Errors
    ///
    /// [`StatusError::Open`] if the repository cannot be opened or is bare.
    pub fn open(root: &Path) -> Result<Self, StatusError> {
        let repo = git2::Repository::open(root).map_err(|e| StatusError::Open {
            path: root.to_path_buf(),
            message: e.message().to_string(),
        })?;

        if repo.is_bare() {
            return Err(StatusError::Open {
                path: root.to_path_buf(),
                message: "bare repository not supported".to_string(),
            });
        }

        Ok(Self { repo })
    }

    /// The working directory of the repository.
    pub fn work_dir(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }

    /// Snapshot the working tree status.
    ///
    /// Ignored files are never reported. Untracked files are reported
    /// individually (untracked directories are recursed) when
    /// `include_untracked` is set.
    pub fn statuses(&self, include_untracked: bool) -> Result<StatusMap, StatusError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(include_untracked)
            .recurse_untracked_dirs(include_untracked)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| StatusError::Query {
                message: e.message().to_string(),
            })?;

        let mut map = StatusMap::new();
        for entry in statuses.iter() {
            let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
            let (staged, worktree) = split_status(entry.status());
            if staged == FileState::Unmodified && worktree == FileState::Unmodified {
                continue;
            }
            map.insert(path.clone(), StatusEntry::new(path, staged, worktree));
        }

        Ok(map)
    }
}

/// Split a git2 status bitset into its index and worktree sides.
fn split_status(status: git2::Status) -> (FileState, FileState) {
    if status.is_conflicted() {
        return (FileState::Conflicted, FileState::Conflicted);
    }

    let staged = if status.is_index_new() {
        FileState::Added
    } else if status.is_index_deleted() {
        FileState::Deleted
    } else if status.is_index_renamed() {
        FileState::Renamed
    } else if status.is_index_typechange() {
        FileState::TypeChanged
    } else if status.is_index_modified() {
        FileState::Modified
    } else {
        FileState::Unmodified
    };

    let worktree = if status.is_wt_new() {
        FileState::Untracked
    } else if status.is_wt_deleted() {
        FileState::Deleted
    } else if status.is_wt_renamed() {
        FileState::Renamed
    } else if status.is_wt_typechange() {
        FileState::TypeChanged
    } else if status.is_wt_modified() {
        FileState::Modified
    } else {
        FileState::Unmodified
    };

    (staged, worktree)
}

/// Production status oracle backed by git2.
#[derive(Debug, Clone, Copy)]
pub struct Git {
    include_untracked: bool,
}

impl Git {
    /// Create an oracle; `include_untracked` controls whether untracked
    /// files are reported.
    pub fn new(include_untracked: bool) -> Self {
        Self { include_untracked }
    }
}

impl Default for Git {
    fn default() -> Self {
        Self::new(true)
    }
}

impl StatusOracle for Git {
    fn status(&self, root: &Path) -> Result<StatusMap, StatusError> {
        let repo = Repo::open(root)?;
        let map = repo.statuses(self.include_untracked)?;
        log::debug!("{} status entries under {}", map.len(), root.display());
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod split_status {
        use super::*;

        #[test]
        fn clean_is_unmodified() {
            assert_eq!(
                split_status(git2::Status::CURRENT),
                (FileState::Unmodified, FileState::Unmodified)
            );
        }

        #[test]
        fn untracked() {
            assert_eq!(
                split_status(git2::Status::WT_NEW),
                (FileState::Unmodified, FileState::Untracked)
            );
        }

        #[test]
        fn staged_then_modified() {
            assert_eq!(
                split_status(git2::Status::INDEX_NEW | git2::Status::WT_MODIFIED),
                (FileState::Added, FileState::Modified)
            );
        }

        #[test]
        fn deleted_sides() {
            assert_eq!(
                split_status(git2::Status::INDEX_DELETED),
                (FileState::Deleted, FileState::Unmodified)
            );
            assert_eq!(
                split_status(git2::Status::WT_DELETED),
                (FileState::Unmodified, FileState::Deleted)
            );
        }

        #[test]
        fn typechange_and_rename() {
            assert_eq!(
                split_status(git2::Status::INDEX_RENAMED | git2::Status::WT_TYPECHANGE),
                (FileState::Renamed, FileState::TypeChanged)
            );
        }

        #[test]
        fn conflicts_win() {
            assert_eq!(
                split_status(git2::Status::CONFLICTED | git2::Status::WT_MODIFIED),
                (FileState::Conflicted, FileState::Conflicted)
            );
        }
    }

    mod status_error {
        use super::*;

        #[test]
        fn open_error_names_path() {
            let err = StatusError::Open {
                path: PathBuf::from("/repo"),
                message: "could not find repository".to_string(),
            };
            assert_eq!(
                err.to_string(),
                "cannot open repository at /repo: could not find repository"
            );
        }
    }
}
