//! Main parallel indexing engine implementation.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use log::{debug, error, info};
use parking_lot::Mutex;
use rayon::ThreadPoolBuilder;

use crate::analysis::{SpaceTokenizer, Tokenizer};
use crate::document::DocumentSource;
use crate::error::{LexIndexError, Result};
use crate::index::{IndexStateGuard, IndexStore};
use crate::parallel_index::config::IndexerConfig;
use crate::parallel_index::metrics::{
    BuildMetrics, BuildMetricsCollector, BuildReport, BuildTimer, WorkerReport,
};
use crate::parallel_index::partitioner::SegmentPartitioner;
use crate::parallel_index::worker::IndexWorker;

/// Engine that rebuilds the shared index from a document source.
pub struct ParallelIndexEngine {
    /// Configuration for the engine.
    config: IndexerConfig,

    /// Where documents come from.
    source: Arc<dyn DocumentSource>,

    /// Tokenizer shared by all workers.
    tokenizer: Arc<dyn Tokenizer>,

    /// The index being built.
    store: Arc<IndexStore>,

    /// Ready flag published after a successful build.
    state: Arc<IndexStateGuard>,

    /// Serializes builds; queries never take it.
    build_lock: Mutex<()>,

    /// Metrics collector.
    metrics: BuildMetricsCollector,
}

impl ParallelIndexEngine {
    /// Create a new engine reading from `source`.
    pub fn new(config: IndexerConfig, source: Arc<dyn DocumentSource>) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(IndexStore::with_shards(config.shard_count));

        Ok(Self {
            config,
            source,
            tokenizer: Arc::new(SpaceTokenizer::new()),
            store,
            state: Arc::new(IndexStateGuard::new()),
            build_lock: Mutex::new(()),
            metrics: BuildMetricsCollector::new(),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Shared index store.
    pub fn store(&self) -> &Arc<IndexStore> {
        &self.store
    }

    /// Shared ready flag.
    pub fn state(&self) -> &Arc<IndexStateGuard> {
        &self.state
    }

    /// Get current build metrics.
    pub fn metrics(&self) -> BuildMetrics {
        self.metrics.snapshot()
    }

    /// Check a requested worker count against `1..=max_workers`.
    pub fn validate_worker_count(&self, worker_count: usize) -> Result<()> {
        if worker_count == 0 {
            return Err(LexIndexError::invalid_argument(
                "ThreadsCount must be greater than 0",
            ));
        }
        let max_workers = self.config.max_workers();
        if worker_count > max_workers {
            return Err(LexIndexError::invalid_argument(format!(
                "ThreadsCount is too large ({worker_count} > {max_workers})"
            )));
        }
        Ok(())
    }

    /// Rebuild the index from scratch with `worker_count` workers.
    ///
    /// A rejected worker count leaves the previous index and ready flag
    /// untouched. Once documents are discovered the flag is reset and the
    /// store cleared; the flag is set again only after every worker has
    /// finished successfully.
    pub fn build(&self, worker_count: usize) -> Result<BuildReport> {
        if let Err(e) = self.validate_worker_count(worker_count) {
            self.metrics.record_rejected();
            return Err(e);
        }

        let _build = self.build_lock.lock();

        let files = match self.source.discover() {
            Ok(files) => files,
            Err(e) => {
                self.metrics.record_failure();
                return Err(e);
            }
        };
        info!(
            "building index over {} files from {} with {} workers",
            files.len(),
            self.source.description(),
            worker_count
        );

        let total_files = files.len();
        self.state.reset();
        self.store.clear();

        let timer = BuildTimer::start();
        let result = if worker_count == 1 {
            self.worker(0, Arc::new(AtomicBool::new(false)))
                .run(&files)
                .map(|report| vec![report])
        } else {
            self.run_parallel(files, worker_count)
        };
        let elapsed = timer.elapsed();

        let workers = match result {
            Ok(workers) => workers,
            Err(e) => {
                error!("index build failed after {elapsed:?}: {e}");
                self.metrics.record_failure();
                return Err(e);
            }
        };

        let report = BuildReport {
            worker_count,
            total_files,
            files_indexed: workers.iter().map(|w| w.files_indexed).sum(),
            tokens: workers.iter().map(|w| w.tokens).sum(),
            distinct_words: self.store.len(),
            elapsed,
            workers,
        };

        self.state.mark_ready();
        self.metrics.record_success(&report);
        info!(
            "indexed {} files ({} distinct words) in {:.3} ms",
            report.files_indexed,
            report.distinct_words,
            report.elapsed_ms()
        );
        Ok(report)
    }

    fn worker(&self, worker_id: usize, cancelled: Arc<AtomicBool>) -> IndexWorker {
        IndexWorker::new(
            worker_id,
            Arc::clone(&self.source),
            Arc::clone(&self.tokenizer),
            Arc::clone(&self.store),
            self.config.failure_policy,
            cancelled,
        )
    }

    /// Fan the segments out to a pool of exactly `worker_count` threads and
    /// wait for every one of them to report.
    fn run_parallel(&self, files: Vec<PathBuf>, worker_count: usize) -> Result<Vec<WorkerReport>> {
        let partitioner = SegmentPartitioner::new(worker_count)?;
        let segments = partitioner.segments(files.len());
        let files: Arc<[PathBuf]> = files.into();

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("lexindex-worker-{i}"))
            .build()
            .map_err(|e| LexIndexError::other(format!("Failed to create thread pool: {e}")))?;

        let cancelled = Arc::new(AtomicBool::new(false));
        let (tx, rx) = crossbeam_channel::unbounded();

        for (worker_id, range) in segments.into_iter().enumerate() {
            let worker = self.worker(worker_id, Arc::clone(&cancelled));
            let files = Arc::clone(&files);
            let tx = tx.clone();

            thread_pool.spawn(move || {
                let worker_id = worker.worker_id();
                debug!("worker {worker_id} starting on {} files", range.len());
                let result = panic::catch_unwind(AssertUnwindSafe(|| worker.run(&files[range])))
                    .unwrap_or_else(|_| {
                        Err(LexIndexError::thread_join(format!(
                            "worker {worker_id} panicked"
                        )))
                    });
                let _ = tx.send(result);
            });
        }

        // Drop the original sender so the receiver knows when all workers are done
        drop(tx);

        let mut reports = Vec::with_capacity(worker_count);
        let mut root_cause: Option<LexIndexError> = None;
        let mut cancellation: Option<LexIndexError> = None;
        for result in rx.iter() {
            match result {
                Ok(report) => reports.push(report),
                Err(e @ LexIndexError::OperationCancelled(_)) => {
                    cancellation.get_or_insert(e);
                }
                Err(e) => {
                    root_cause.get_or_insert(e);
                }
            }
        }

        if let Some(e) = root_cause.or(cancellation) {
            return Err(e);
        }
        if reports.len() != worker_count {
            return Err(LexIndexError::thread_join(format!(
                "{} of {worker_count} workers exited without reporting",
                worker_count - reports.len()
            )));
        }

        reports.sort_by_key(|r| r.worker_id);
        Ok(reports)
    }
}

impl std::fmt::Debug for ParallelIndexEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelIndexEngine")
            .field("config", &self.config)
            .field("source", &self.source.description())
            .field("tokenizer", &self.tokenizer.name())
            .field("state", &self.state.state())
            .finish()
    }
}
