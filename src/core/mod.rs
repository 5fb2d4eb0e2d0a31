//! core
//!
//! Core domain types, repository discovery, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Status entries, candidates, outcomes, run reports
//! - [`locate`] - Repository root discovery
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Status snapshots are plain data, read-only to the engine
//! - Per-file failures are values, not control flow

pub mod config;
pub mod locate;
pub mod types;
