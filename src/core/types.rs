//! core::types
//!
//! Domain types shared by the status oracle, the file processor and the
//! orchestrator.
//!
//! # Types
//!
//! - [`FileState`] - One side (index or worktree) of a Git status flag
//! - [`StatusEntry`] - A repo-relative path with its staged/unstaged state
//! - [`StatusMap`] - Snapshot of all pending changes for one run
//! - [`Candidate`] - A status entry resolved against the repository root
//! - [`Outcome`] - Per-file result of a format attempt
//! - [`RunReport`] - Aggregate of all outcomes in a run
//!
//! # Examples
//!
//! ```
//! use dirtyfmt::core::types::{FileState, StatusEntry};
//!
//! let entry = StatusEntry::new("src/a.json", FileState::Unmodified, FileState::Modified);
//! assert!(!entry.is_deleted());
//! assert_eq!(entry.base_name(), "a.json");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// State of one side of a Git status entry.
///
/// The same enum describes both the staged (index) side and the worktree
/// side of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileState {
    /// No change on this side
    #[default]
    Unmodified,
    /// Content modified
    Modified,
    /// Newly added to the index
    Added,
    /// Removed
    Deleted,
    /// Renamed
    Renamed,
    /// Copied
    Copied,
    /// Not tracked by Git
    Untracked,
    /// File type changed (e.g. file became a symlink)
    TypeChanged,
    /// Unresolved merge conflict
    Conflicted,
}

impl FileState {
    /// Single-letter code, matching `git status --short`.
    pub fn code(&self) -> char {
        match self {
            FileState::Unmodified => ' ',
            FileState::Modified => 'M',
            FileState::Added => 'A',
            FileState::Deleted => 'D',
            FileState::Renamed => 'R',
            FileState::Copied => 'C',
            FileState::Untracked => '?',
            FileState::TypeChanged => 'T',
            FileState::Conflicted => 'U',
        }
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileState::Unmodified => "unmodified",
            FileState::Modified => "modified",
            FileState::Added => "added",
            FileState::Deleted => "deleted",
            FileState::Renamed => "renamed",
            FileState::Copied => "copied",
            FileState::Untracked => "untracked",
            FileState::TypeChanged => "typechange",
            FileState::Conflicted => "conflicted",
        };
        write!(f, "{}", name)
    }
}

/// One path with pending changes, as reported by the status oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Path relative to the repository root, `/`-separated
    pub path: String,
    /// Index side of the status
    pub staged: FileState,
    /// Worktree side of the status
    pub worktree: FileState,
}

impl StatusEntry {
    /// Create a new status entry.
    pub fn new(path: impl Into<String>, staged: FileState, worktree: FileState) -> Self {
        Self {
            path: path.into(),
            staged,
            worktree,
        }
    }

    /// True if either side records a deletion.
    ///
    /// A deleted path cannot be stat'd, so it must be filtered out before
    /// touching the filesystem.
    pub fn is_deleted(&self) -> bool {
        self.staged == FileState::Deleted || self.worktree == FileState::Deleted
    }

    /// Final path component.
    pub fn base_name(&self) -> &str {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.path)
    }
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}",
            self.staged.code(),
            self.worktree.code(),
            self.path
        )
    }
}

/// Snapshot of pending changes, keyed by repo-relative path.
pub type StatusMap = BTreeMap<String, StatusEntry>;

/// A status entry resolved against the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The repo-relative path as given by the oracle
    pub repo_path: String,
    /// Absolute path on disk
    pub abs_path: PathBuf,
}

impl Candidate {
    /// Resolve a status entry against the repository root.
    pub fn new(root: &Path, entry: &StatusEntry) -> Self {
        Self {
            repo_path: entry.path.clone(),
            abs_path: root.join(&entry.path),
        }
    }

    /// Final path component of the absolute path.
    pub fn base_name(&self) -> &str {
        self.abs_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Why a candidate finished without a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unchanged {
    /// Formatted content already equals the file content
    Formatted,
    /// Staged or worktree side is deleted
    Deleted,
    /// Path resolves to a directory
    Directory,
    /// Path is neither a regular file nor a directory
    NotRegular,
    /// Base name starts with `.`
    Hidden,
    /// Base name does not end with the formatter's suffix
    Suffix,
}

impl Unchanged {
    /// True for every reason except [`Unchanged::Formatted`].
    pub fn is_skip(&self) -> bool {
        !matches!(self, Unchanged::Formatted)
    }
}

impl fmt::Display for Unchanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Unchanged::Formatted => "already formatted",
            Unchanged::Deleted => "deleted",
            Unchanged::Directory => "directory",
            Unchanged::NotRegular => "not a regular file",
            Unchanged::Hidden => "hidden",
            Unchanged::Suffix => "suffix mismatch",
        };
        write!(f, "{}", reason)
    }
}

/// Category of a per-file failure.
#[derive(Debug, Error)]
pub enum FileErrorKind {
    #[error("{0}")]
    Stat(#[source] std::io::Error),

    #[error("{0}")]
    Read(#[source] std::io::Error),

    #[error("{0}")]
    Format(#[source] crate::format::FormatError),

    #[error("{0}")]
    Write(#[source] std::io::Error),

    /// The worker running this file panicked.
    #[error("worker failed: {0}")]
    Worker(String),
}

/// A failure confined to one file.
///
/// Displays as `<repo-relative-path>: <message>`.
#[derive(Debug, Error)]
#[error("{path}: {kind}")]
pub struct FileError {
    /// Repo-relative path of the file
    pub path: String,
    /// What went wrong
    pub kind: FileErrorKind,
}

impl FileError {
    /// Wrap a failure kind with the path it occurred on.
    pub fn new(path: impl Into<String>, kind: FileErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Result of processing one status entry.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing was written
    Unchanged(Unchanged),
    /// The file was (or, in dry-run mode, would be) rewritten
    Rewritten,
    /// Processing failed; siblings are unaffected
    Failed(FileError),
}

impl Outcome {
    /// True if this outcome is a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Aggregate of all outcomes in one run.
///
/// Ordering of `rewritten` and `failed` follows completion order and
/// carries no meaning.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Repo-relative paths that were rewritten
    pub rewritten: Vec<String>,
    /// Per-file failures
    pub failed: Vec<FileError>,
    /// Candidates that were already formatted
    pub formatted: usize,
    /// Entries skipped by the eligibility rules
    pub skipped: usize,
}

impl RunReport {
    /// Fold one outcome into the report.
    pub fn record(&mut self, path: &str, outcome: Outcome) {
        match outcome {
            Outcome::Unchanged(reason) if reason.is_skip() => self.skipped += 1,
            Outcome::Unchanged(_) => self.formatted += 1,
            Outcome::Rewritten => self.rewritten.push(path.to_string()),
            Outcome::Failed(err) => self.failed.push(err),
        }
    }

    /// True if no file failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of outcomes recorded.
    pub fn total(&self) -> usize {
        self.rewritten.len() + self.failed.len() + self.formatted + self.skipped
    }
}
