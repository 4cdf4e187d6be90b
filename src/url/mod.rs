//! URL handling module for Crawldown
//!
//! This module provides URL normalization, link classification, path
//! exclusion, and domain scoping for discovered links.

mod classify;
mod domain;
mod exclude;
mod normalize;

// Re-export main functions
pub use classify::{classify_link, LinkClass, SkipReason};
pub use domain::{extract_domain, matches_wildcard, DomainScope};
pub use exclude::is_excluded;
pub use normalize::{normalize_url, registry_key};

use crate::{UrlError, UrlResult};
use ::url::Url;

/// Parses the URL a crawl starts from
///
/// Only absolute `http`/`https` URLs with a host can be crawled.
pub fn parse_crawl_root(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Returns `scheme://host[:port]/path` for a parsed URL
///
/// This is the query-less, fragment-less form used by path exclusion and
/// by link localization lookups.
pub fn origin_and_path(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}
