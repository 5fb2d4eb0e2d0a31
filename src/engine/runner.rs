//! engine::runner
//!
//! Fan-out/fan-in over a status snapshot.
//!
//! # Flow
//!
//! ```text
//! status (once) -> spawn one task per entry -> drain in completion order -> RunReport
//! ```
//!
//! Each entry is processed on tokio's blocking pool, gated by a semaphore of
//! `jobs` permits. All tasks are spawned before any is awaited. The runner
//! is the only consumer of finished tasks, so reporting and aggregation need
//! no locking, and output lines never interleave.
//!
//! A task that panics is reported as a failure of its own path; siblings
//! keep running. Every dispatched entry yields exactly one outcome, even if
//! its task is lost.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::process::process_entry;
use super::{RunError, RunOptions};
use crate::core::types::{FileError, FileErrorKind, Outcome, RunReport};
use crate::format::Formatter;
use crate::git::StatusOracle;
use crate::ui::output::Reporter;

/// Run the pipeline for the repository at `root`.
///
/// Queries `oracle` once, processes every entry, and returns only after all
/// of them finished. Outcomes are streamed to `reporter` as they complete.
///
/// # Errors
///
/// Only run-level failures (status query) are errors. Per-file failures are
/// collected in the returned [`RunReport`].
pub async fn run_async(
    root: &Path,
    options: &RunOptions,
    oracle: &dyn StatusOracle,
    formatter: Arc<dyn Formatter>,
    reporter: &dyn Reporter,
) -> Result<RunReport, RunError> {
    let status = oracle.status(root)?;
    log::debug!(
        "dispatching {} entries with {} jobs{}",
        status.len(),
        options.jobs,
        if options.dry_run { " (dry run)" } else { "" }
    );

    let limit = Arc::new(Semaphore::new(options.jobs.clamp(1, Semaphore::MAX_PERMITS)));
    let root: Arc<PathBuf> = Arc::new(root.to_path_buf());
    let dry_run = options.dry_run;

    let mut tasks = JoinSet::new();
    let mut pending = BTreeSet::new();
    for (path, entry) in status {
        pending.insert(path.clone());
        let limit = Arc::clone(&limit);
        let root = Arc::clone(&root);
        let formatter = Arc::clone(&formatter);

        tasks.spawn(async move {
            let _permit = limit.acquire_owned().await;
            let worker = tokio::task::spawn_blocking(move || {
                process_entry(&root, &entry, formatter.as_ref(), dry_run)
            });
            let outcome = match worker.await {
                Ok(outcome) => outcome,
                Err(err) => Outcome::Failed(FileError::new(
                    path.as_str(),
                    FileErrorKind::Worker(err.to_string()),
                )),
            };
            (path, outcome)
        });
    }

    let report = collect(tasks, pending, reporter).await;

    log::debug!(
        "{} rewritten, {} formatted, {} skipped, {} failed",
        report.rewritten.len(),
        report.formatted,
        report.skipped,
        report.failed.len()
    );

    Ok(report)
}

/// Drain `tasks` in completion order.
///
/// `pending` holds every dispatched path. A path whose task never returned
/// is recorded as a worker failure once the set is empty.
async fn collect(
    mut tasks: JoinSet<(String, Outcome)>,
    mut pending: BTreeSet<String>,
    reporter: &dyn Reporter,
) -> RunReport {
    let mut report = RunReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((path, outcome)) => {
                pending.remove(&path);
                reporter.report(&path, &outcome);
                report.record(&path, outcome);
            }
            Err(err) => log::error!("file task did not complete: {}", err),
        }
    }

    for path in pending {
        let outcome = Outcome::Failed(FileError::new(
            path.as_str(),
            FileErrorKind::Worker("task did not complete".to_string()),
        ));
        reporter.report(&path, &outcome);
        report.record(&path, outcome);
    }

    report
}

/// Synchronous wrapper around [`run_async`].
///
/// Builds a multi-threaded tokio runtime for the duration of the run.
pub fn run(
    root: &Path,
    options: &RunOptions,
    oracle: &dyn StatusOracle,
    formatter: Arc<dyn Formatter>,
    reporter: &dyn Reporter,
) -> Result<RunReport, RunError> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(RunError::Runtime)?;
    rt.block_on(run_async(root, options, oracle, formatter, reporter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{FileState, StatusEntry, StatusMap, Unchanged};
    use crate::format::{FormatError, JsonFormatter};
    use crate::git::StatusError;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Oracle returning a fixed snapshot.
    struct FixedStatus(StatusMap);

    impl FixedStatus {
        fn new(entries: &[(&str, FileState, FileState)]) -> Self {
            let map = entries
                .iter()
                .map(|(path, staged, worktree)| {
                    (path.to_string(), StatusEntry::new(*path, *staged, *worktree))
                })
                .collect();
            Self(map)
        }
    }

    impl StatusOracle for FixedStatus {
        fn status(&self, _root: &Path) -> Result<StatusMap, StatusError> {
            Ok(self.0.clone())
        }
    }

    struct FailingStatus;

    impl StatusOracle for FailingStatus {
        fn status(&self, _root: &Path) -> Result<StatusMap, StatusError> {
            Err(StatusError::Query {
                message: "index corrupt".to_string(),
            })
        }
    }

    /// Formatter that panics on one specific input.
    struct Panicky;

    impl Formatter for Panicky {
        fn suffix(&self) -> &str {
            ".json"
        }

        fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
            if source == b"panic" {
                panic!("formatter bug");
            }
            JsonFormatter::default().format(source)
        }
    }

    #[derive(Default)]
    struct Collect {
        rewritten: Mutex<Vec<String>>,
        unchanged: Mutex<Vec<(String, Unchanged)>>,
        failed: Mutex<Vec<String>>,
    }

    impl Reporter for Collect {
        fn rewritten(&self, path: &str) {
            self.rewritten.lock().unwrap().push(path.to_string());
        }

        fn unchanged(&self, path: &str, reason: Unchanged) {
            self.unchanged.lock().unwrap().push((path.to_string(), reason));
        }

        fn failed(&self, error: &FileError) {
            self.failed.lock().unwrap().push(error.to_string());
        }
    }

    fn options(jobs: usize) -> RunOptions {
        RunOptions {
            jobs,
            dry_run: false,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn every_entry_gets_one_outcome() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), "[1]").unwrap();
        fs::write(dir.path().join("b.json"), "[\n  1\n]\n").unwrap();
        fs::write(dir.path().join("c.json"), "{").unwrap();
        fs::write(dir.path().join("d.txt"), "x").unwrap();

        let oracle = FixedStatus::new(&[
            ("a.json", FileState::Unmodified, FileState::Modified),
            ("b.json", FileState::Added, FileState::Unmodified),
            ("c.json", FileState::Unmodified, FileState::Untracked),
            ("d.txt", FileState::Unmodified, FileState::Modified),
            ("e.json", FileState::Deleted, FileState::Unmodified),
        ]);
        let reporter = Collect::default();

        let report = run_async(
            dir.path(),
            &options(4),
            &oracle,
            Arc::new(JsonFormatter::default()),
            &reporter,
        )
        .await
        .unwrap();

        assert_eq!(report.total(), 5);
        assert_eq!(report.rewritten, vec!["a.json".to_string()]);
        assert_eq!(report.formatted, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.failed.len(), 1);
        assert!(!report.is_success());

        assert_eq!(*reporter.rewritten.lock().unwrap(), vec!["a.json".to_string()]);
        let failed = reporter.failed.lock().unwrap();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].starts_with("c.json: "));
    }

    #[tokio::test]
    async fn status_failure_aborts_before_processing() {
        let dir = TempDir::new().unwrap();
        let reporter = Collect::default();

        let err = run_async(
            dir.path(),
            &options(1),
            &FailingStatus,
            Arc::new(JsonFormatter::default()),
            &reporter,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RunError::Status(StatusError::Query { .. })));
        assert_eq!(err.to_string(), "cannot read working tree status: index corrupt");
        assert!(reporter.rewritten.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn panic_is_isolated_to_its_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("boom.json"), "panic").unwrap();
        fs::write(dir.path().join("ok.json"), "{}").unwrap();

        let oracle = FixedStatus::new(&[
            ("boom.json", FileState::Unmodified, FileState::Modified),
            ("ok.json", FileState::Unmodified, FileState::Modified),
        ]);

        let report = run_async(
            dir.path(),
            &options(2),
            &oracle,
            Arc::new(Panicky),
            &Collect::default(),
        )
        .await
        .unwrap();

        assert_eq!(report.rewritten, vec!["ok.json".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, "boom.json");
        assert!(matches!(report.failed[0].kind, FileErrorKind::Worker(_)));
    }

    async fn vanish() -> (String, Outcome) {
        panic!("task dropped before returning its path")
    }

    #[tokio::test]
    async fn lost_task_still_gets_an_outcome() {
        let mut tasks = JoinSet::new();
        tasks.spawn(async { ("ok.json".to_string(), Outcome::Rewritten) });
        tasks.spawn(vanish());
        let pending: BTreeSet<String> = ["lost.json", "ok.json"]
            .into_iter()
            .map(String::from)
            .collect();
        let reporter = Collect::default();

        let report = collect(tasks, pending, &reporter).await;

        assert_eq!(report.total(), 2);
        assert_eq!(report.rewritten, vec!["ok.json".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, "lost.json");
        assert!(matches!(report.failed[0].kind, FileErrorKind::Worker(_)));
        assert!(!report.is_success());
        assert_eq!(
            *reporter.failed.lock().unwrap(),
            vec!["lost.json: worker failed: task did not complete".to_string()]
        );
    }

    #[test]
    fn oversized_job_count_is_clamped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), "[1]").unwrap();
        let oracle = FixedStatus::new(&[("a.json", FileState::Unmodified, FileState::Modified)]);

        let report = run(
            dir.path(),
            &options(usize::MAX),
            &oracle,
            Arc::new(JsonFormatter::default()),
            &Collect::default(),
        )
        .unwrap();

        assert_eq!(report.rewritten, vec!["a.json".to_string()]);
    }

    #[test]
    fn sequential_run_matches_contract() {
        let dir = TempDir::new().unwrap();
        for i in 0..8 {
            fs::write(dir.path().join(format!("f{i}.json")), "[true]").unwrap();
        }
        let entries: Vec<(String, FileState, FileState)> = (0..8)
            .map(|i| (format!("f{i}.json"), FileState::Untracked, FileState::Untracked))
            .collect();
        let borrowed: Vec<(&str, FileState, FileState)> = entries
            .iter()
            .map(|(p, s, w)| (p.as_str(), *s, *w))
            .collect();
        let oracle = FixedStatus::new(&borrowed);

        let report = run(
            dir.path(),
            &options(1),
            &oracle,
            Arc::new(JsonFormatter::default()),
            &Collect::default(),
        )
        .unwrap();

        let mut rewritten = report.rewritten.clone();
        rewritten.sort();
        let mut expected: Vec<String> = (0..8).map(|i| format!("f{i}.json")).collect();
        expected.sort();
        assert_eq!(rewritten, expected);
        assert!(report.is_success());
    }
}
