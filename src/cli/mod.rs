//! cli
//!
//! Command-line interface layer for dirtyfmt.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Initialise logging
//! - Build [`RunOptions`] once from flags and configuration files
//! - Wire the production oracle, formatter and reporter into the engine
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and hands a fully
//! resolved configuration to the [`crate::engine`]; nothing downstream reads
//! global state.

pub mod args;

pub use args::Cli;

use std::sync::Arc;

use anyhow::Result;

use crate::core::config::Config;
use crate::core::types::RunReport;
use crate::engine::{self, RunOptions};
use crate::format::JsonFormatter;
use crate::git::Git;
use crate::ui::output::{ConsoleReporter, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Per-file failures
/// are part of the returned report; only run-level failures are errors.
pub fn run() -> Result<RunReport> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let cwd = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let root = engine::locate(&cwd)?;
    let loaded = Config::load(Some(root.as_path())).map_err(engine::RunError::from)?;
    for warning in &loaded.warnings {
        log::warn!("{}: {}", warning.path.display(), warning.message);
    }
    let config = loaded.config;
    if let Some(path) = config.global_config_loaded_from() {
        log::debug!("global config: {}", path.display());
    }
    if let Some(path) = config.repo_config_loaded_from() {
        log::debug!("repo config: {}", path.display());
    }

    let options = resolve_options(&cli, &config);
    let oracle = Git::new(!cli.no_untracked && config.include_untracked());
    let formatter = Arc::new(JsonFormatter::new(config.indent()));
    let reporter = ConsoleReporter::new(Verbosity::from_flags(cli.quiet, cli.verbose));

    let report = engine::run(&root, &options, &oracle, formatter, &reporter)?;
    Ok(report)
}

/// Apply precedence: CLI flag, then configuration, then default.
fn resolve_options(cli: &Cli, config: &Config) -> RunOptions {
    let jobs = cli
        .jobs
        .or(config.jobs())
        .unwrap_or_else(engine::default_jobs);

    RunOptions {
        jobs,
        dry_run: cli.dry_run,
    }
}

/// Initialise `env_logger`: warnings by default, debug with `--debug`,
/// and `RUST_LOG` overrides both.
fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}
