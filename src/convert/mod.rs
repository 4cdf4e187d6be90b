//! Document conversion for crawled pages
//!
//! This module turns extracted page HTML into Markdown documents and, once
//! the crawl has finished, rewrites the links between those documents to
//! point at local files.
//!
//! # Components
//!
//! - `MarkdownConverter`: HTML → Markdown transcoding with cleanup
//! - `generate_filename`: local file name for a page URL
//! - `localize_links` / `localize_all`: link rewriting against the frozen index

mod filename;
mod localize;
mod markdown;

pub use filename::generate_filename;
pub use localize::{localize_all, localize_links, FinalizedDocument};
pub use markdown::{document_header, DocumentConverter, MarkdownConverter};

use thiserror::Error;

/// Conversion-specific errors
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Empty HTML content")]
    EmptyInput,

    #[error("Conversion failed: {0}")]
    Failed(String),
}

/// Result type alias for conversion operations
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;
