//! Fan-out / fan-in over OS threads.
//!
//! ```text
//! paths ──► job queue (bounded) ──► worker 0..N ──┐
//!                                                 ├──► results ──► collector ──► DigestTable
//! paths ──► one thread per path ──────────────────┘
//! ```
//!
//! Producers never touch the table. Each job sends exactly one report on
//! the results channel, and the calling thread is the only consumer. The
//! channel disconnects once every producer has exited, which is the barrier
//! before the table is handed back.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, warn};

use crate::config::{DigestConfig, Strategy};
use crate::digest::{DigestSequence, FileTotal, digest_file, sum_file};
use crate::error::DigestError;

use super::table::DigestTable;

/// One job's outcome, sent from a producer to the collector.
struct Report<T> {
    index: usize,
    result: Result<T, DigestError>,
}

/// Runs a per-file job across threads and gathers the results.
///
/// # Example
///
/// ```no_run
/// use chunksim::{Dispatcher, Strategy, digest_file};
/// use std::path::PathBuf;
///
/// let paths = vec![PathBuf::from("a.bin"), PathBuf::from("b.bin")];
/// let table = Dispatcher::new(Strategy::pool()).run(&paths, |p| digest_file(p, 1024));
///
/// for failure in table.failures() {
///     eprintln!("{}", failure);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    strategy: Strategy,
}

impl Dispatcher {
    /// Creates a dispatcher with the given strategy.
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// Creates a dispatcher using the strategy from `config`.
    pub fn from_config(config: &DigestConfig) -> Self {
        Self::new(config.strategy())
    }

    /// Returns the strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Runs `job` once per entry of `paths` and collects the outcomes.
    ///
    /// Duplicated paths run as separate jobs. A failing or panicking job is
    /// recorded as a failure for its path and does not affect the others.
    /// Returns only after every job has reported.
    pub fn run<T, F>(&self, paths: &[PathBuf], job: F) -> DigestTable<T>
    where
        T: Send,
        F: Fn(&Path) -> Result<T, DigestError> + Sync,
    {
        let mut table = DigestTable::with_capacity(paths.len());
        if paths.is_empty() {
            return table.finish();
        }

        info!(files = paths.len(), strategy = ?self.strategy, "dispatching");

        let mut reported = vec![false; paths.len()];
        let (results_tx, results_rx) = crossbeam_channel::unbounded::<Report<T>>();

        thread::scope(|scope| {
            let handles = match self.strategy {
                Strategy::PerFile => spawn_per_file(scope, paths, &job, &results_tx),
                Strategy::Pool { workers } => {
                    spawn_pool(scope, paths, &job, workers, &results_tx)
                }
            };

            // Only producers hold senders now; the loop below ends when the
            // last of them exits.
            drop(results_tx);

            for report in results_rx.iter() {
                reported[report.index] = true;
                table.record(report.index, &paths[report.index], report.result);
            }

            for handle in handles {
                if handle.join().is_err() {
                    warn!("dispatch thread panicked");
                }
            }
        });

        for (index, _) in reported.iter().enumerate().filter(|(_, done)| !**done) {
            let path = &paths[index];
            table.record(
                index,
                path,
                Err(DigestError::WorkerPanicked { path: path.clone() }),
            );
        }

        let table = table.finish();
        info!(
            digested = table.len(),
            failed = table.failures().len(),
            "dispatch complete"
        );
        table
    }
}

/// Runs `job` for one path, turning a panic into a failure.
fn run_job<T, F>(job: &F, path: &Path) -> Result<T, DigestError>
where
    F: Fn(&Path) -> Result<T, DigestError>,
{
    catch_unwind(AssertUnwindSafe(|| job(path))).unwrap_or_else(|_| {
        Err(DigestError::WorkerPanicked {
            path: path.to_path_buf(),
        })
    })
}

fn spawn_per_file<'scope, 'env, T, F>(
    scope: &'scope thread::Scope<'scope, 'env>,
    paths: &'env [PathBuf],
    job: &'env F,
    results: &Sender<Report<T>>,
) -> Vec<thread::ScopedJoinHandle<'scope, ()>>
where
    T: Send + 'env,
    F: Fn(&Path) -> Result<T, DigestError> + Sync,
{
    let mut handles = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        let tx = results.clone();
        let spawned = thread::Builder::new()
            .name(format!("digest-file-{index}"))
            .spawn_scoped(scope, move || {
                let result = run_job(job, path);
                let _ = tx.send(Report { index, result });
            });

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                debug!(error = %e, index, "spawn failed, digesting inline");
                let result = run_job(job, path);
                let _ = results.send(Report { index, result });
            }
        }
    }
    handles
}

fn spawn_pool<'scope, 'env, T, F>(
    scope: &'scope thread::Scope<'scope, 'env>,
    paths: &'env [PathBuf],
    job: &'env F,
    workers: usize,
    results: &Sender<Report<T>>,
) -> Vec<thread::ScopedJoinHandle<'scope, ()>>
where
    T: Send + 'env,
    F: Fn(&Path) -> Result<T, DigestError> + Sync,
{
    let workers = workers.clamp(1, paths.len());
    let (jobs_tx, jobs_rx) = crossbeam_channel::bounded::<usize>(workers);

    let mut handles = Vec::with_capacity(workers);
    for worker_idx in 0..workers {
        let rx = jobs_rx.clone();
        let tx = results.clone();
        let spawned = thread::Builder::new()
            .name(format!("digest-worker-{worker_idx}"))
            .spawn_scoped(scope, move || pool_worker(worker_idx, paths, job, rx, tx));

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => warn!(error = %e, worker_idx, "failed to spawn worker"),
        }
    }

    // Drop the collector's clone so the queue disconnects when workers exit.
    drop(jobs_rx);

    if handles.is_empty() {
        for (index, path) in paths.iter().enumerate() {
            let result = run_job(job, path);
            let _ = results.send(Report { index, result });
        }
        return handles;
    }

    for index in 0..paths.len() {
        if jobs_tx.send(index).is_err() {
            // Every worker is gone; unsent jobs are caught as unreported.
            break;
        }
    }
    handles
}

fn pool_worker<T, F>(
    worker_idx: usize,
    paths: &[PathBuf],
    job: &F,
    jobs: Receiver<usize>,
    results: Sender<Report<T>>,
) where
    F: Fn(&Path) -> Result<T, DigestError>,
{
    debug!(worker_idx, "worker started");
    let mut done = 0usize;
    for index in jobs.iter() {
        let result = run_job(job, &paths[index]);
        if results.send(Report { index, result }).is_err() {
            break;
        }
        done += 1;
    }
    debug!(worker_idx, jobs = done, "worker finished");
}

/// Digests every path with the configured chunk size and strategy.
pub fn digest_all(paths: &[PathBuf], config: &DigestConfig) -> DigestTable<DigestSequence> {
    let chunk_size = config.chunk_size();
    Dispatcher::from_config(config).run(paths, |path| digest_file(path, chunk_size))
}

/// Sums every path as a whole file, using the configured strategy.
pub fn sum_all(paths: &[PathBuf], config: &DigestConfig) -> DigestTable<FileTotal> {
    let chunk_size = config.chunk_size();
    Dispatcher::from_config(config).run(paths, |path| sum_file(path, chunk_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn strategies() -> Vec<Strategy> {
        vec![
            Strategy::PerFile,
            Strategy::with_workers(1),
            Strategy::with_workers(3),
            Strategy::with_workers(64),
        ]
    }

    #[test]
    fn test_empty_input_completes() {
        for strategy in strategies() {
            let table = Dispatcher::new(strategy).run(&[], |_| Ok(0u8));
            assert!(table.is_empty());
            assert_eq!(table.dispatched(), 0);
        }
    }

    #[test]
    fn test_every_job_reports() {
        let input: Vec<PathBuf> = (0..50).map(|i| PathBuf::from(format!("f{i}"))).collect();
        for strategy in strategies() {
            let calls = AtomicUsize::new(0);
            let table = Dispatcher::new(strategy).run(&input, |p| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(p.to_string_lossy().len())
            });
            assert_eq!(calls.load(Ordering::SeqCst), 50);
            assert_eq!(table.len(), 50);
            assert!(table.failures().is_empty());
            assert_eq!(table.get("f42"), Some(&3));
        }
    }

    #[test]
    fn test_failure_isolated() {
        let input = paths(&["ok1", "bad", "ok2"]);
        for strategy in strategies() {
            let table = Dispatcher::new(strategy).run(&input, |p| {
                if p == Path::new("bad") {
                    Err(std::io::Error::other("boom").into())
                } else {
                    Ok(1u8)
                }
            });
            assert_eq!(table.len(), 2);
            assert!(table.get("bad").is_none());
            assert_eq!(table.failures().len(), 1);
            assert_eq!(table.failures()[0].index, 1);
        }
    }

    #[test]
    fn test_panic_isolated() {
        let input = paths(&["fine", "explode"]);
        for strategy in strategies() {
            let table = Dispatcher::new(strategy).run(&input, |p| {
                if p == Path::new("explode") {
                    panic!("job panicked");
                }
                Ok(7u8)
            });
            assert_eq!(table.get("fine"), Some(&7));
            assert!(matches!(
                table.failures()[0].error,
                DigestError::WorkerPanicked { .. }
            ));
        }
    }

    #[test]
    fn test_duplicate_paths_run_independently() {
        let input = paths(&["same", "same", "other"]);
        let calls = AtomicUsize::new(0);
        let table = Dispatcher::new(Strategy::with_workers(2)).run(&input, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(table.dispatched(), 3);
        assert_eq!(table.len(), 2);
    }
}
