//! Parallel index construction.
//!
//! A build discovers every document, splits the ordered file list into one
//! contiguous segment per worker, and runs the workers on a dedicated thread
//! pool. Each worker reads its files in order, tokenizes and normalizes
//! their content and merges the words into the shared
//! [`IndexStore`](crate::index::IndexStore). The engine waits for every
//! worker before it flips the index to ready.

pub mod config;
pub mod engine;
pub mod metrics;
pub mod partitioner;
pub mod worker;

pub use config::{FailurePolicy, IndexerConfig};
pub use engine::ParallelIndexEngine;
pub use metrics::{BuildMetrics, BuildMetricsCollector, BuildReport, BuildTimer, WorkerReport};
pub use partitioner::SegmentPartitioner;
pub use worker::IndexWorker;
