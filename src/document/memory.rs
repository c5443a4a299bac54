//! In-memory document source, mostly for tests and benchmarks.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::document::{DocumentId, DocumentSource, LineStream};
use crate::error::{LexIndexError, Result};

/// Documents held in memory under a virtual root.
///
/// A document registered with [`add_unreadable`](Self::add_unreadable) is
/// discovered normally but fails when opened.
#[derive(Debug, Clone)]
pub struct MemoryDocumentSource {
    root: PathBuf,
    documents: BTreeMap<PathBuf, Option<String>>,
}

impl MemoryDocumentSource {
    /// Create an empty source with a virtual root directory.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            documents: BTreeMap::new(),
        }
    }

    /// Add a document at `name` relative to the root.
    pub fn add_document<S: Into<String>>(&mut self, name: &str, content: S) -> &mut Self {
        self.documents
            .insert(self.root.join(name), Some(content.into()));
        self
    }

    /// Add a document that is discovered but cannot be read.
    pub fn add_unreadable(&mut self, name: &str) -> &mut Self {
        self.documents.insert(self.root.join(name), None);
        self
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents are registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for MemoryDocumentSource {
    fn discover(&self) -> Result<Vec<PathBuf>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn read_lines(&self, path: &Path) -> Result<LineStream> {
        match self.documents.get(path) {
            Some(Some(content)) => {
                let lines: Vec<io::Result<String>> =
                    content.lines().map(|line| Ok(line.to_string())).collect();
                Ok(Box::new(lines.into_iter()))
            }
            Some(None) => Err(LexIndexError::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "document is unreadable"),
            )),
            None => Err(LexIndexError::io(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such document"),
            )),
        }
    }

    fn document_id(&self, path: &Path) -> DocumentId {
        DocumentId::from_path(&self.root, path)
    }

    fn description(&self) -> String {
        format!(
            "MemoryDocumentSource(root='{}', documents={})",
            self.root.display(),
            self.documents.len()
        )
    }
}
