//! Filesystem-backed document source.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;

use crate::document::{DocumentId, DocumentSource, LineStream};
use crate::error::{LexIndexError, Result};

/// Documents are every regular file below a root directory, recursively.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    root: PathBuf,
}

impl FsDocumentSource {
    /// Create a source rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn walk(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| LexIndexError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| LexIndexError::io(dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| LexIndexError::io(&path, e))?;

            if file_type.is_dir() {
                self.walk(&path, files)?;
            } else if path.is_file() {
                files.push(path);
            }
        }
        Ok(())
    }
}

/// Line iterator that never fails on content.
///
/// Invalid UTF-8 sequences decode to U+FFFD, a leading byte order mark is
/// dropped, and both `\n` and `\r\n` terminate a line. Only I/O errors from
/// the underlying reader are yielded as `Err`.
struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
    first: bool,
}

impl<R: BufRead> LossyLines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            first: true,
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                let mut bytes = self.buf.as_slice();
                if std::mem::take(&mut self.first) {
                    bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                }
                Some(Ok(String::from_utf8_lossy(bytes).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

impl DocumentSource for FsDocumentSource {
    fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.walk(&self.root, &mut files)?;
        // read_dir order is platform dependent
        files.sort();

        debug!(
            "discovered {} files under {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }

    fn read_lines(&self, path: &Path) -> Result<LineStream> {
        let file = File::open(path).map_err(|e| LexIndexError::io(path, e))?;
        Ok(Box::new(LossyLines::new(BufReader::new(file))))
    }

    fn document_id(&self, path: &Path) -> DocumentId {
        DocumentId::from_path(&self.root, path)
    }

    fn description(&self) -> String {
        format!("FsDocumentSource(root='{}')", self.root.display())
    }
}
