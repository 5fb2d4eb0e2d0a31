//! ui::output
//!
//! Result reporting.
//!
//! # Design
//!
//! The engine streams each outcome to a [`Reporter`] as soon as the file
//! finishes. [`ConsoleReporter`] writes rewritten paths to stdout and
//! failures to stderr, one line each. Diagnostics go through `log`, never
//! through this module.

use std::fmt::Display;
use std::io::Write;

use crate::core::types::{FileError, Outcome, Unchanged};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - no stdout, failures only
    Quiet,
    /// Normal mode - one line per rewritten path
    Normal,
    /// Verbose mode - every formatted candidate, with markers
    Verbose,
}

impl Verbosity {
    /// Create verbosity from flags. Quiet wins over verbose.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Sink for per-file outcomes.
pub trait Reporter: Send + Sync {
    /// A file was rewritten (or would be, in a dry run).
    fn rewritten(&self, path: &str);

    /// A file needed no write.
    fn unchanged(&self, _path: &str, _reason: Unchanged) {}

    /// A file failed.
    fn failed(&self, error: &FileError);

    /// Dispatch an outcome to the matching method.
    fn report(&self, path: &str, outcome: &Outcome) {
        match outcome {
            Outcome::Unchanged(reason) => self.unchanged(path, *reason),
            Outcome::Rewritten => self.rewritten(path),
            Outcome::Failed(err) => self.failed(err),
        }
    }
}

/// Reporter writing to the process's stdout and stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    verbosity: Verbosity,
}

impl ConsoleReporter {
    /// Create a console reporter.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn line(&self, text: impl Display) {
        let mut out = std::io::stdout().lock();
        // A closed stdout (e.g. `| head`) must not abort the run.
        let _ = writeln!(out, "{}", text);
    }
}

impl Reporter for ConsoleReporter {
    fn rewritten(&self, path: &str) {
        match self.verbosity {
            Verbosity::Quiet => {}
            Verbosity::Normal => self.line(path),
            Verbosity::Verbose => self.line(format_marked("[+]", path)),
        }
    }

    fn unchanged(&self, path: &str, reason: Unchanged) {
        if self.verbosity == Verbosity::Verbose && reason == Unchanged::Formatted {
            self.line(format_marked("[=]", path));
        }
    }

    fn failed(&self, err: &FileError) {
        error(err);
    }
}

/// Format a path with a status marker.
pub fn format_marked(marker: &str, path: &str) -> String {
    format!("{} {}", marker, path)
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    let mut err = std::io::stderr().lock();
    let _ = writeln!(err, "{}", message);
}
