//! Output module for finalized documents and run statistics
//!
//! This module handles:
//! - Writing localized documents to the output directory
//! - Counting what happened during a run and printing the summary

pub mod stats;
mod traits;
mod writer;

pub use stats::{print_statistics, CrawlStatistics, CrawlStats};
pub use traits::{DocumentSink, OutputError, OutputResult};
pub use writer::{write_documents, DirectoryWriter, WriteSummary};
