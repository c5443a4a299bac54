//! Documents and where they come from.
//!
//! A document is a text file under the indexed root. It is identified by its
//! [`DocumentId`]: the path relative to the root, joined with the platform
//! separator. Discovery and line reading sit behind [`DocumentSource`] so the
//! indexing engine does not care whether documents live on disk
//! ([`FsDocumentSource`]) or in memory ([`MemoryDocumentSource`]).

pub mod file;
pub mod memory;

use std::borrow::Borrow;
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use file::FsDocumentSource;
pub use memory::MemoryDocumentSource;

/// Boxed line iterator handed to a worker for one document.
pub type LineStream = Box<dyn Iterator<Item = io::Result<String>> + Send>;

/// Identifier of an indexed document: its root-relative path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap an already-relative identifier.
    pub fn new<S: Into<String>>(id: S) -> Self {
        DocumentId(id.into())
    }

    /// Build an identifier for `path` with the `root` segment stripped.
    ///
    /// Paths that do not live under `root` keep every component except
    /// the first one.
    pub fn from_path(root: &Path, path: &Path) -> Self {
        let relative = match path.strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => path.components().skip(1).collect(),
        };

        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        DocumentId(parts.join(std::path::MAIN_SEPARATOR_STR))
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        DocumentId::new(id)
    }
}

/// Provider of the documents to index.
///
/// Implementations must be shareable across worker threads.
pub trait DocumentSource: Send + Sync {
    /// List every document under the root, in a stable order.
    fn discover(&self) -> Result<Vec<PathBuf>>;

    /// Open a document for line-by-line reading.
    fn read_lines(&self, path: &Path) -> Result<LineStream>;

    /// Identifier reported for `path` in query results.
    fn document_id(&self, path: &Path) -> DocumentId;

    /// Get a human-readable description of this source.
    fn description(&self) -> String;
}
