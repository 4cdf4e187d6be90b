//! Page registry for completed pages
//!
//! This module holds the shared, append-only map from normalized URL to
//! converted page that phase one of a crawl fills and phase two reads:
//! - `PageRegistry`: lock-guarded table with insert-if-absent registration
//! - `FrozenRegistry`: immutable snapshot with the URL → filename index

mod frozen;
mod page_registry;

pub use frozen::{FrozenRegistry, UrlToFilenameIndex};
pub use page_registry::PageRegistry;

/// A completed, converted page keyed by its normalized URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Registry key: normalized URL without a trailing slash
    pub normalized_url: String,

    /// The page URL links in the document are resolved against
    pub original_url: String,

    /// Local file name derived from the URL
    pub generated_filename: String,

    /// Markdown including the document header
    pub converted_markup: String,
}

/// Outcome of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterOutcome {
    /// The record was stored
    Inserted,
    /// A record with the same key already existed; the new one was dropped
    AlreadyPresent,
}

impl RegisterOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }
}
