//! A single indexing worker.
//!
//! A worker owns one segment of the file list and indexes it front to back.
//! Words of a document are deduplicated locally and merged into the shared
//! store once the whole document has been read.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ahash::AHashSet;
use log::{debug, warn};

use crate::analysis::{Tokenizer, Word, normalize, tokenize_lines};
use crate::document::DocumentSource;
use crate::error::{LexIndexError, Result};
use crate::index::IndexStore;
use crate::parallel_index::config::FailurePolicy;
use crate::parallel_index::metrics::{BuildTimer, WorkerReport};

/// Indexes one segment of documents into the shared store.
#[derive(Clone)]
pub struct IndexWorker {
    worker_id: usize,
    source: Arc<dyn DocumentSource>,
    tokenizer: Arc<dyn Tokenizer>,
    store: Arc<IndexStore>,
    policy: FailurePolicy,
    cancelled: Arc<AtomicBool>,
}

impl IndexWorker {
    /// Create a worker writing into `store`.
    ///
    /// `cancelled` is shared by every worker of a build. A worker sets it
    /// when it fails and checks it before each document.
    pub fn new(
        worker_id: usize,
        source: Arc<dyn DocumentSource>,
        tokenizer: Arc<dyn Tokenizer>,
        store: Arc<IndexStore>,
        policy: FailurePolicy,
        cancelled: Arc<AtomicBool>,
    ) -> Self {
        Self {
            worker_id,
            source,
            tokenizer,
            store,
            policy,
            cancelled,
        }
    }

    /// Worker index.
    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    /// Index every file of `segment` in order.
    pub fn run(&self, segment: &[PathBuf]) -> Result<WorkerReport> {
        let timer = BuildTimer::start();
        let mut report = WorkerReport {
            worker_id: self.worker_id,
            ..Default::default()
        };

        for path in segment {
            if self.cancelled.load(Ordering::Acquire) {
                return Err(LexIndexError::cancelled(format!(
                    "worker {} stopped after another worker failed",
                    self.worker_id
                )));
            }

            match self.index_file(path) {
                Ok(tokens) => {
                    report.files_indexed += 1;
                    report.tokens += tokens;
                }
                Err(LexIndexError::Io { path, source })
                    if self.policy == FailurePolicy::SkipUnreadable =>
                {
                    warn!("skipping unreadable document {}: {}", path.display(), source);
                    report.skipped.push(self.source.document_id(&path));
                }
                Err(e) => {
                    self.cancelled.store(true, Ordering::Release);
                    return Err(e);
                }
            }
        }

        report.elapsed = timer.elapsed();
        debug!(
            "worker {} indexed {} files ({} tokens) in {:?}",
            self.worker_id, report.files_indexed, report.tokens, report.elapsed
        );
        Ok(report)
    }

    /// Index one document and return the number of raw tokens read.
    fn index_file(&self, path: &Path) -> Result<u64> {
        let lines = self.source.read_lines(path)?;
        let doc_id = self.source.document_id(path);

        let mut words: AHashSet<Word> = AHashSet::new();
        let mut tokens = 0u64;
        for token in tokenize_lines(self.tokenizer.as_ref(), lines) {
            let token = token.map_err(|e| LexIndexError::io(path, e))?;
            words.insert(normalize(&token));
            tokens += 1;
        }

        self.store.upsert_all(words, &doc_id);
        Ok(tokens)
    }
}
