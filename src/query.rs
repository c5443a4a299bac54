//! Point lookups against the built index.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use lexindex::document::DocumentId;
//! use lexindex::index::{IndexStateGuard, IndexStore};
//! use lexindex::query::QueryEngine;
//!
//! let store = Arc::new(IndexStore::new());
//! let state = Arc::new(IndexStateGuard::new());
//! let engine = QueryEngine::new(Arc::clone(&store), Arc::clone(&state));
//!
//! assert!(engine.query("cat").is_err());
//!
//! store.upsert("cat".to_string(), &DocumentId::new("a.txt"));
//! state.mark_ready();
//! assert_eq!(engine.query(" CAT ").unwrap(), Some(vec![DocumentId::new("a.txt")]));
//! ```

use std::sync::Arc;

use log::trace;

use crate::analysis::normalize;
use crate::document::DocumentId;
use crate::error::{LexIndexError, Result};
use crate::index::{IndexStateGuard, IndexStore};

/// Answers single-word queries.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    store: Arc<IndexStore>,
    state: Arc<IndexStateGuard>,
}

impl QueryEngine {
    /// Create a query engine over a store and its ready flag.
    pub fn new(store: Arc<IndexStore>, state: Arc<IndexStateGuard>) -> Self {
        Self { store, state }
    }

    /// Documents containing `raw_word` after normalization.
    ///
    /// Returns `Ok(None)` for a word that was never indexed and
    /// [`LexIndexError::NotReady`] when no build has completed. The
    /// documents are sorted by identifier.
    pub fn query(&self, raw_word: &str) -> Result<Option<Vec<DocumentId>>> {
        if !self.state.is_ready() {
            return Err(LexIndexError::NotReady);
        }

        let word = normalize(raw_word);
        let result = self.store.lookup(&word).map(|postings| {
            let mut docs: Vec<DocumentId> = postings.into_iter().collect();
            docs.sort_unstable();
            docs
        });

        trace!(
            "query '{}' -> {} documents",
            word,
            result.as_ref().map_or(0, |docs| docs.len())
        );
        Ok(result)
    }
}
