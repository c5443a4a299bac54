//! The three operations exposed to an outer transport: `is_indexed`,
//! `build_index` and `query`.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use lexindex::document::MemoryDocumentSource;
//! use lexindex::parallel_index::IndexerConfig;
//! use lexindex::service::IndexService;
//!
//! let mut source = MemoryDocumentSource::new("Input");
//! source.add_document("a.txt", "the cat sat");
//! source.add_document("b.txt", "the dog sat");
//!
//! let service = IndexService::with_source(IndexerConfig::default(), Arc::new(source)).unwrap();
//! assert!(!service.is_indexed());
//!
//! service.build_index(Some(2)).unwrap();
//! assert!(service.is_indexed());
//! assert_eq!(service.query("cat").unwrap().unwrap().len(), 1);
//! assert!(service.query("zzz").unwrap().is_none());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::{DocumentId, DocumentSource, FsDocumentSource};
use crate::error::Result;
use crate::index::IndexState;
use crate::parallel_index::{BuildMetrics, BuildReport, IndexerConfig, ParallelIndexEngine};
use crate::query::QueryEngine;

/// Snapshot of the service for status output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStats {
    pub state: IndexState,
    pub distinct_words: usize,
    pub metrics: BuildMetrics,
}

/// Long-lived index service.
#[derive(Debug)]
pub struct IndexService {
    engine: ParallelIndexEngine,
    query: QueryEngine,
}

impl IndexService {
    /// Create a service indexing the files under `config.root`.
    pub fn new(config: IndexerConfig) -> Result<Self> {
        let source = Arc::new(FsDocumentSource::new(config.root.clone()));
        Self::with_source(config, source)
    }

    /// Create a service over an arbitrary document source.
    pub fn with_source(config: IndexerConfig, source: Arc<dyn DocumentSource>) -> Result<Self> {
        let engine = ParallelIndexEngine::new(config, source)?;
        let query = QueryEngine::new(Arc::clone(engine.store()), Arc::clone(engine.state()));
        Ok(Self { engine, query })
    }

    /// Whether a completed index is available.
    pub fn is_indexed(&self) -> bool {
        self.engine.state().is_ready()
    }

    /// Rebuild the index and return the parallel phase duration in
    /// milliseconds. `None` uses the configured default worker count.
    pub fn build_index(&self, worker_count: Option<usize>) -> Result<f64> {
        self.build_index_with_report(worker_count)
            .map(|report| report.elapsed_ms())
    }

    /// Rebuild the index and return the full build report.
    pub fn build_index_with_report(&self, worker_count: Option<usize>) -> Result<BuildReport> {
        let worker_count = worker_count.unwrap_or(self.engine.config().default_workers);
        self.engine.build(worker_count)
    }

    /// Documents containing `word`, `None` if it was never indexed.
    pub fn query(&self, word: &str) -> Result<Option<Vec<DocumentId>>> {
        self.query.query(word)
    }

    /// Current state, index size and build metrics.
    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            state: self.engine.state().state(),
            distinct_words: self.engine.store().len(),
            metrics: self.engine.metrics(),
        }
    }

    /// Underlying engine.
    pub fn engine(&self) -> &ParallelIndexEngine {
        &self.engine
    }
}
