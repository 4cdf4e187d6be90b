//! Output sink trait and errors

use crate::convert::FinalizedDocument;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid document filename: {0:?}")]
    InvalidFilename(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for finalized documents
///
/// Implementations must write each document completely or not at all.
pub trait DocumentSink: Send + Sync {
    /// Writes one document, returning where it ended up
    fn write_document(&self, document: &FinalizedDocument) -> OutputResult<PathBuf>;
}
