//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! There are no subcommands: invoking `dirtyfmt` formats the dirty files of
//! the repository containing the working directory.
//!
//! # Flags
//!
//! - `--help` / `-h`: Show banner and flags
//! - `--version` / `-V`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--jobs <n>` / `-j`: Concurrent file workers
//! - `--dry-run` / `-n`: Report without writing
//! - `--no-untracked`: Skip untracked files
//! - `--verbose` / `-v`: Also list already-formatted files
//! - `--quiet` / `-q`: No stdout
//! - `--debug`: Enable debug logging

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{CommandFactory, FromArgMatches, Parser};

use crate::core::config::MAX_JOBS;

/// Format the JSON files with pending changes in a Git working tree
#[derive(Parser, Debug)]
#[command(name = "dirtyfmt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if dirtyfmt was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Number of files formatted concurrently [default: available CPUs]
    #[arg(
        short,
        long,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_JOBS as u64)
    )]
    pub jobs: Option<usize>,

    /// List files that need formatting without rewriting them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Do not format untracked files
    #[arg(long)]
    pub no_untracked: bool,

    /// Also list already-formatted files, with [+]/[=] markers
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// No output on stdout; failures still go to stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments, exiting on `--help` or usage errors.
    pub fn parse_args() -> Self {
        let matches = Self::command().before_help(banner()).get_matches();
        match Self::from_arg_matches(&matches) {
            Ok(cli) => cli,
            Err(err) => err.exit(),
        }
    }
}

/// Program banner shown above `--help`: name, version and build target.
pub fn banner() -> String {
    format!(
        "{} {} ({}-{})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}
