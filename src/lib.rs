//! # lexindex
//!
//! A concurrent in-memory inverted index over a directory of text documents.
//!
//! ## Features
//!
//! - Static partitioning of the file list across a configurable number of workers
//! - Lock-sharded word → document-set store with atomic per-word upserts
//! - Ready flag that is only published after every worker has finished
//! - Case- and whitespace-insensitive single-word queries
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use lexindex::document::MemoryDocumentSource;
//! use lexindex::parallel_index::IndexerConfig;
//! use lexindex::service::IndexService;
//!
//! let mut source = MemoryDocumentSource::new("Input");
//! source.add_document("a.txt", "the cat sat");
//!
//! let service = IndexService::with_source(IndexerConfig::default(), Arc::new(source)).unwrap();
//! service.build_index(None).unwrap();
//! assert!(service.query("Cat").unwrap().is_some());
//! ```

pub mod analysis;
pub mod cli;
pub mod document;
pub mod error;
pub mod index;
pub mod parallel_index;
pub mod query;
pub mod service;

pub mod prelude {
    pub use crate::document::{DocumentId, DocumentSource, FsDocumentSource, MemoryDocumentSource};
    pub use crate::error::{LexIndexError, Result};
    pub use crate::parallel_index::{BuildReport, FailurePolicy, IndexerConfig};
    pub use crate::service::IndexService;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
