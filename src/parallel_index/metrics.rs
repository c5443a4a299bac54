//! Build reports and cumulative build metrics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::document::DocumentId;

/// What a single worker did during one build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerReport {
    /// Worker index, matching its segment.
    pub worker_id: usize,

    /// Files indexed by this worker.
    pub files_indexed: usize,

    /// Raw tokens read, before deduplication.
    pub tokens: u64,

    /// Files skipped because they could not be read.
    pub skipped: Vec<DocumentId>,

    /// Wall-clock time spent in the worker.
    pub elapsed: Duration,
}

/// Result of a successful build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    /// Number of workers used.
    pub worker_count: usize,

    /// Files discovered under the root.
    pub total_files: usize,

    /// Files that made it into the index.
    pub files_indexed: usize,

    /// Raw tokens read across all workers.
    pub tokens: u64,

    /// Distinct words in the finished index.
    pub distinct_words: usize,

    /// Time from the cleared store to the last worker finishing.
    pub elapsed: Duration,

    /// Per-worker breakdown, ordered by worker id.
    pub workers: Vec<WorkerReport>,
}

impl BuildReport {
    /// Elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Every file skipped during the build.
    pub fn skipped(&self) -> Vec<DocumentId> {
        self.workers
            .iter()
            .flat_map(|w| w.skipped.iter().cloned())
            .collect()
    }
}

/// Simple timer for build phases.
pub struct BuildTimer {
    start: Instant,
}

impl BuildTimer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Totals across every build run by one engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildMetrics {
    pub total_builds: u64,
    pub successful_builds: u64,
    pub failed_builds: u64,
    pub rejected_builds: u64,
    pub total_files_indexed: u64,
    pub total_build_time: Duration,
    pub last_build_time: Option<Duration>,
}

/// Thread-safe collector behind [`BuildMetrics`].
#[derive(Debug, Default)]
pub struct BuildMetricsCollector {
    total_builds: AtomicU64,
    successful_builds: AtomicU64,
    failed_builds: AtomicU64,
    rejected_builds: AtomicU64,
    total_files_indexed: AtomicU64,
    total_build_nanos: AtomicU64,
    // u64::MAX means no successful build yet
    last_build_nanos: AtomicU64,
}

impl BuildMetricsCollector {
    /// Create a new collector.
    pub fn new() -> Self {
        Self {
            last_build_nanos: AtomicU64::new(u64::MAX),
            ..Default::default()
        }
    }

    /// Record a build that finished and published its index.
    pub fn record_success(&self, report: &BuildReport) {
        let nanos = report.elapsed.as_nanos().min(u64::MAX as u128 - 1) as u64;
        self.total_builds.fetch_add(1, Ordering::Relaxed);
        self.successful_builds.fetch_add(1, Ordering::Relaxed);
        self.total_files_indexed
            .fetch_add(report.files_indexed as u64, Ordering::Relaxed);
        self.total_build_nanos.fetch_add(nanos, Ordering::Relaxed);
        self.last_build_nanos.store(nanos, Ordering::Relaxed);
    }

    /// Record a build that started but failed.
    pub fn record_failure(&self) {
        self.total_builds.fetch_add(1, Ordering::Relaxed);
        self.failed_builds.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a build request rejected before doing any work.
    pub fn record_rejected(&self) {
        self.rejected_builds.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of the current metrics.
    pub fn snapshot(&self) -> BuildMetrics {
        let last = self.last_build_nanos.load(Ordering::Relaxed);
        BuildMetrics {
            total_builds: self.total_builds.load(Ordering::Relaxed),
            successful_builds: self.successful_builds.load(Ordering::Relaxed),
            failed_builds: self.failed_builds.load(Ordering::Relaxed),
            rejected_builds: self.rejected_builds.load(Ordering::Relaxed),
            total_files_indexed: self.total_files_indexed.load(Ordering::Relaxed),
            total_build_time: Duration::from_nanos(
                self.total_build_nanos.load(Ordering::Relaxed),
            ),
            last_build_time: (last != u64::MAX).then(|| Duration::from_nanos(last)),
        }
    }
}
