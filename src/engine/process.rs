//! engine::process
//!
//! Format one status entry.
//!
//! # Pipeline
//!
//! ```text
//! deleted? -> name filters -> stat -> type filters -> read -> format -> compare -> write
//! ```
//!
//! Every step either continues, finishes with [`Outcome::Unchanged`], or
//! finishes with [`Outcome::Failed`]. Errors never escape this module: they
//! are wrapped with the entry's path and returned as an outcome, so one bad
//! file cannot stop its siblings.
//!
//! # Invariants
//!
//! - A deleted entry never touches the filesystem.
//! - Hidden and wrong-suffix names are skipped before the file is stat'd.
//! - Nothing is written when formatting is a no-op.
//! - A rewritten file keeps its original permission bits.

use std::fs;
use std::path::Path;

use crate::core::types::{Candidate, FileError, FileErrorKind, Outcome, StatusEntry, Unchanged};
use crate::format::Formatter;

/// Process one status entry.
///
/// With `dry_run` set, a file that needs formatting is reported as
/// [`Outcome::Rewritten`] but left untouched on disk.
pub fn process_entry(
    root: &Path,
    entry: &StatusEntry,
    formatter: &dyn Formatter,
    dry_run: bool,
) -> Outcome {
    match try_process(root, entry, formatter, dry_run) {
        Ok(outcome) => {
            if let Outcome::Unchanged(reason) = &outcome {
                log::debug!("{}: unchanged ({})", entry.path, reason);
            }
            outcome
        }
        Err(kind) => Outcome::Failed(FileError::new(&entry.path, kind)),
    }
}

fn try_process(
    root: &Path,
    entry: &StatusEntry,
    formatter: &dyn Formatter,
    dry_run: bool,
) -> Result<Outcome, FileErrorKind> {
    // A deleted path cannot be stat'd; that is not an I/O error.
    if entry.is_deleted() {
        return Ok(Outcome::Unchanged(Unchanged::Deleted));
    }

    let candidate = Candidate::new(root, entry);
    if let Some(reason) = name_filter(candidate.base_name(), formatter.suffix()) {
        return Ok(Outcome::Unchanged(reason));
    }

    let metadata = fs::metadata(&candidate.abs_path).map_err(FileErrorKind::Stat)?;
    if metadata.is_dir() {
        return Ok(Outcome::Unchanged(Unchanged::Directory));
    }
    if !metadata.is_file() {
        return Ok(Outcome::Unchanged(Unchanged::NotRegular));
    }

    let content = fs::read(&candidate.abs_path).map_err(FileErrorKind::Read)?;
    let formatted = formatter
        .format(&content)
        .map_err(FileErrorKind::Format)?;

    if formatted == content {
        return Ok(Outcome::Unchanged(Unchanged::Formatted));
    }

    if dry_run {
        log::debug!("{}: needs formatting (dry run)", entry.path);
        return Ok(Outcome::Rewritten);
    }

    fs::write(&candidate.abs_path, &formatted).map_err(FileErrorKind::Write)?;
    fs::set_permissions(&candidate.abs_path, metadata.permissions())
        .map_err(FileErrorKind::Write)?;
    log::debug!("{}: rewrote {} bytes", entry.path, formatted.len());

    Ok(Outcome::Rewritten)
}

/// Eligibility rules that only need the base name.
fn name_filter(base_name: &str, suffix: &str) -> Option<Unchanged> {
    if base_name.starts_with('.') {
        Some(Unchanged::Hidden)
    } else if !base_name.ends_with(suffix) {
        Some(Unchanged::Suffix)
    } else {
        None
    }
}
