//! dirtyfmt - Format the dirty files of a Git working tree
//!
//! dirtyfmt finds the files with pending changes in a Git working tree,
//! keeps the ones a formatter handles, and rewrites each in canonical form.
//! Files that are already canonical are never written.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, wires the engine)
//! - [`engine`] - Orchestrates Locate → Status → Fan-out → Report
//! - [`core`] - Domain types, repository discovery, configuration
//! - [`git`] - Single interface for Git status
//! - [`format`] - Formatter contract and the built-in JSON formatter
//! - [`ui`] - Outcome reporting
//!
//! # Correctness Invariants
//!
//! 1. Status is snapshotted once per run
//! 2. Every status entry produces exactly one outcome
//! 3. One file's failure never prevents another file from being formatted
//! 4. Rewritten files keep their permission bits

pub mod cli;
pub mod core;
pub mod engine;
pub mod format;
pub mod git;
pub mod ui;
