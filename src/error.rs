//! Error types for the lexindex library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`LexIndexError`] enum.
//!
//! # Examples
//!
//! ```
//! use lexindex::error::{LexIndexError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexIndexError::invalid_argument("worker count must be greater than 0"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for lexindex operations.
#[derive(Error, Debug)]
pub enum LexIndexError {
    /// A caller-supplied argument was out of range (e.g. a bad worker count).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A query was issued before any build completed successfully.
    #[error("Files were not indexed yet")]
    NotReady,

    /// A document could not be discovered or read.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A worker stopped early because a sibling worker failed.
    #[error("Operation cancelled: {0}")]
    OperationCancelled(String),

    /// A worker panicked or went away without reporting.
    #[error("Thread join error: {0}")]
    ThreadJoinError(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with LexIndexError.
pub type Result<T> = std::result::Result<T, LexIndexError>;

impl LexIndexError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LexIndexError::InvalidArgument(msg.into())
    }

    /// Create a new I/O error bound to the path that caused it.
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        LexIndexError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        LexIndexError::OperationCancelled(msg.into())
    }

    /// Create a new thread join error.
    pub fn thread_join<S: Into<String>>(msg: S) -> Self {
        LexIndexError::ThreadJoinError(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LexIndexError::Other(msg.into())
    }

    /// Whether the caller can fix the request and try again without
    /// anything changing on disk.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            LexIndexError::InvalidArgument(_) | LexIndexError::NotReady
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LexIndexError::invalid_argument("ThreadsCount is too large");
        assert_eq!(
            error.to_string(),
            "Invalid argument: ThreadsCount is too large"
        );

        let error = LexIndexError::NotReady;
        assert_eq!(error.to_string(), "Files were not indexed yet");

        let error = LexIndexError::cancelled("sibling failed");
        assert_eq!(error.to_string(), "Operation cancelled: sibling failed");
    }

    #[test]
    fn test_io_error_carries_path() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = LexIndexError::io("Input/a.txt", io_error);

        match &error {
            LexIndexError::Io { path, .. } => assert_eq!(path, &PathBuf::from("Input/a.txt")),
            _ => panic!("Expected IO error variant"),
        }
        assert!(error.to_string().contains("a.txt"));
    }

    #[test]
    fn test_retriable_errors() {
        assert!(LexIndexError::NotReady.is_retriable());
        assert!(LexIndexError::invalid_argument("x").is_retriable());
        assert!(!LexIndexError::other("x").is_retriable());
        assert!(
            !LexIndexError::io("a", io::Error::other("boom")).is_retriable()
        );
    }
}
