//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Outcome reporting to stdout/stderr
//!
//! # Design
//!
//! All user-visible output goes through this module so the stdout/stderr
//! contract stays in one place: stdout carries rewritten paths, stderr
//! carries failures.

pub mod output;
