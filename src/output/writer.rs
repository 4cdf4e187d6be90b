//! Filesystem document writer
//!
//! Every document is written to a temporary file in the output directory and
//! then renamed into place, so an interrupted run never leaves a partially
//! written document behind.

use crate::convert::FinalizedDocument;
use crate::output::{CrawlStats, DocumentSink, OutputError, OutputResult};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Writes documents as files in one directory
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    dir: PathBuf,
}

impl DirectoryWriter {
    /// Creates the writer, creating the directory if needed
    pub fn create(dir: impl Into<PathBuf>) -> OutputResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectoryWriter {
    fn write_document(&self, document: &FinalizedDocument) -> OutputResult<PathBuf> {
        let name = document.filename.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(OutputError::InvalidFilename(document.filename.clone()));
        }

        let target = self.dir.join(name);
        let write_err = |source: std::io::Error| OutputError::Write {
            path: target.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(document.content.as_bytes())
            .map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&target).map_err(|e| write_err(e.error))?;

        Ok(target)
    }
}

/// Result of a write pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub failed: usize,
    pub collisions: usize,
}

/// Writes all documents through a sink
///
/// Failures are logged and counted per document; the remaining documents
/// are still written. When two documents share a filename, the later one in
/// `documents` replaces the earlier one and a warning is logged.
pub fn write_documents(
    documents: &[FinalizedDocument],
    sink: &dyn DocumentSink,
    stats: &CrawlStats,
) -> WriteSummary {
    let mut summary = WriteSummary::default();
    let mut claimed: HashMap<&str, &str> = HashMap::new();

    for document in documents {
        if let Some(previous) = claimed.insert(&document.filename, &document.source_url) {
            warn!(
                "Filename collision on {}: {} replaces {}",
                document.filename, document.source_url, previous
            );
            summary.collisions += 1;
            stats.record_filename_collision();
        }

        match sink.write_document(document) {
            Ok(path) => {
                debug!("Wrote {} -> {}", document.source_url, path.display());
                stats.record_document_written();
                summary.written.push(path);
            }
            Err(e) => {
                warn!("Failed to write document for {}: {}", document.source_url, e);
                stats.record_write_error();
                summary.failed += 1;
            }
        }
    }

    info!(
        "Wrote {} documents ({} failed, {} filename collisions)",
        summary.written.len(),
        summary.failed,
        summary.collisions
    );

    summary
}
