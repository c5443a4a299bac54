//! Concurrent word → document-set store.
//!
//! The store is split into a fixed number of shards, each a hash map behind
//! its own [`RwLock`]. A word always lives in the shard chosen by its hash,
//! so an upsert only locks one shard and workers indexing different words
//! rarely contend. Read-modify-write of a single key happens entirely under
//! that shard's write lock, so concurrent upserts never lose a document.
//!
//! # Examples
//!
//! ```
//! use lexindex::document::DocumentId;
//! use lexindex::index::IndexStore;
//!
//! let store = IndexStore::new();
//! let doc = DocumentId::new("a.txt");
//! store.upsert("cat".to_string(), &doc);
//! store.upsert("cat".to_string(), &doc);
//!
//! assert_eq!(store.lookup("cat").unwrap().len(), 1);
//! assert!(store.lookup("dog").is_none());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::hash::BuildHasher;

use ahash::{AHashMap, AHashSet, RandomState};
use parking_lot::RwLock;

use crate::analysis::Word;
use crate::document::DocumentId;

/// Set of documents that contain a word.
pub type PostingSet = AHashSet<DocumentId>;

/// Default number of shards when none is configured.
pub const DEFAULT_SHARD_COUNT: usize = 64;

type Shard = RwLock<AHashMap<Word, PostingSet>>;

/// Lock-sharded inverted index.
pub struct IndexStore {
    shards: Box<[Shard]>,
    hasher: RandomState,
}

impl IndexStore {
    /// Create a store with [`DEFAULT_SHARD_COUNT`] shards.
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARD_COUNT)
    }

    /// Create a store with `shard_count` shards (at least one).
    pub fn with_shards(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| RwLock::new(AHashMap::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            shards,
            hasher: RandomState::new(),
        }
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_for(&self, word: &str) -> &Shard {
        let hash = self.hasher.hash_one(word);
        &self.shards[(hash % self.shards.len() as u64) as usize]
    }

    /// Add `doc` to the posting set of `word`, creating the set if needed.
    pub fn upsert(&self, word: Word, doc: &DocumentId) {
        let mut shard = self.shard_for(&word).write();
        let postings = shard.entry(word).or_default();
        if !postings.contains(doc) {
            postings.insert(doc.clone());
        }
    }

    /// Add `doc` to the posting set of every word in `words`.
    ///
    /// Words are grouped by shard first so each shard lock is taken once.
    pub fn upsert_all<I>(&self, words: I, doc: &DocumentId)
    where
        I: IntoIterator<Item = Word>,
    {
        let mut by_shard: Vec<Vec<Word>> = vec![Vec::new(); self.shards.len()];
        for word in words {
            let hash = self.hasher.hash_one(word.as_str());
            by_shard[(hash % self.shards.len() as u64) as usize].push(word);
        }

        for (shard, words) in self.shards.iter().zip(by_shard) {
            if words.is_empty() {
                continue;
            }
            let mut shard = shard.write();
            for word in words {
                let postings = shard.entry(word).or_default();
                if !postings.contains(doc) {
                    postings.insert(doc.clone());
                }
            }
        }
    }

    /// Copy of the posting set for `word`, or `None` if it was never indexed.
    pub fn lookup(&self, word: &str) -> Option<PostingSet> {
        self.shard_for(word).read().get(word).cloned()
    }

    /// Remove every word from the store.
    ///
    /// Each shard is cleared under its write lock; once this returns no
    /// posting from before the call is visible.
    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.write().clear();
        }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// Whether the store holds no words.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    /// Ordered copy of the whole index.
    pub fn snapshot(&self) -> BTreeMap<Word, BTreeSet<DocumentId>> {
        let mut snapshot = BTreeMap::new();
        for shard in self.shards.iter() {
            let shard = shard.read();
            for (word, postings) in shard.iter() {
                snapshot.insert(word.clone(), postings.iter().cloned().collect());
            }
        }
        snapshot
    }
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexStore")
            .field("shards", &self.shards.len())
            .field("words", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_upsert_and_lookup() {
        let store = IndexStore::new();
        let a = DocumentId::new("a.txt");
        let b = DocumentId::new("b.txt");

        store.upsert("the".to_string(), &a);
        store.upsert("the".to_string(), &b);
        store.upsert("cat".to_string(), &a);

        let the = store.lookup("the").unwrap();
        assert_eq!(the.len(), 2);
        assert!(the.contains(&a));
        assert!(the.contains(&b));
        assert_eq!(store.lookup("cat").unwrap().len(), 1);
        assert!(store.lookup("dog").is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_duplicates_collapse() {
        let store = IndexStore::new();
        let a = DocumentId::new("a.txt");
        for _ in 0..10 {
            store.upsert("cat".to_string(), &a);
        }
        assert_eq!(store.lookup("cat").unwrap().len(), 1);
    }

    #[test]
    fn test_empty_word_is_a_key() {
        let store = IndexStore::new();
        store.upsert(String::new(), &DocumentId::new("a.txt"));
        assert!(store.lookup("").is_some());
    }

    #[test]
    fn test_clear() {
        let store = IndexStore::with_shards(4);
        store.upsert("cat".to_string(), &DocumentId::new("a.txt"));
        assert!(!store.is_empty());

        store.clear();
        assert!(store.is_empty());
        assert!(store.lookup("cat").is_none());
    }

    #[test]
    fn test_lookup_is_a_copy() {
        let store = IndexStore::new();
        store.upsert("cat".to_string(), &DocumentId::new("a.txt"));

        let before = store.lookup("cat").unwrap();
        store.upsert("cat".to_string(), &DocumentId::new("b.txt"));

        assert_eq!(before.len(), 1);
        assert_eq!(store.lookup("cat").unwrap().len(), 2);
    }

    #[test]
    fn test_upsert_all_matches_upsert() {
        let single = IndexStore::with_shards(8);
        let batched = IndexStore::with_shards(8);
        let doc = DocumentId::new("a.txt");
        let words = ["the", "cat", "sat", "the"];

        for word in words {
            single.upsert(word.to_string(), &doc);
        }
        batched.upsert_all(words.iter().map(|w| w.to_string()), &doc);

        assert_eq!(single.snapshot(), batched.snapshot());
    }

    #[test]
    fn test_zero_shards_rounds_up() {
        assert_eq!(IndexStore::with_shards(0).shard_count(), 1);
    }

    #[test]
    fn test_concurrent_upserts_lose_nothing() {
        let store = Arc::new(IndexStore::with_shards(4));
        let thread_count = 8;
        let docs_per_thread = 200;

        let handles: Vec<_> = (0..thread_count)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for d in 0..docs_per_thread {
                        let doc = DocumentId::new(format!("{t}-{d}.txt"));
                        // every thread hammers the same key
                        store.upsert("shared".to_string(), &doc);
                        store.upsert(format!("word{}", d % 10), &doc);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            store.lookup("shared").unwrap().len(),
            thread_count * docs_per_thread
        );
        let per_word: usize = (0..10)
            .map(|w| store.lookup(&format!("word{w}")).unwrap().len())
            .sum();
        assert_eq!(per_word, thread_count * docs_per_thread);
    }
}
