//! format
//!
//! Canonical formatting of source files.
//!
//! # Design
//!
//! A [`Formatter`] is a pure `bytes -> bytes` transform paired with the file
//! suffix it applies to. The engine never inspects file content itself; it
//! only compares the formatter's output with the input.
//!
//! Implementations must be idempotent: formatting already-formatted content
//! returns it unchanged.
//!
//! # Modules
//!
//! - [`json`] - Built-in JSON formatter

pub mod json;

pub use json::JsonFormatter;

use thiserror::Error;

/// Errors from formatting.
///
/// A format error means the input could not be formatted. It is never
/// equivalent to "no change needed".
#[derive(Debug, Error)]
pub enum FormatError {
    /// Input is not valid source for this formatter.
    #[error("{0}")]
    Syntax(String),

    /// Formatted output could not be produced.
    #[error("cannot render output: {0}")]
    Output(String),
}

/// A canonical formatter for one kind of source file.
pub trait Formatter: Send + Sync {
    /// File name suffix this formatter handles, including the dot.
    fn suffix(&self) -> &str;

    /// Format `source` into its canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if `source` cannot be parsed.
    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError>;
}
