//! Crawldown: a website-to-Markdown crawler
//!
//! This crate crawls a website from a root URL, converts the main content of
//! every page to Markdown, and rewrites links between crawled pages so the
//! resulting document set can be browsed offline.
//!
//! The pipeline runs in two phases:
//! 1. [`crawler::Coordinator`] fetches pages and fills a [`registry::PageRegistry`]
//! 2. [`convert::localize_all`] rewrites links against the frozen registry

pub mod config;
pub mod convert;
pub mod crawler;
pub mod output;
pub mod registry;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Crawldown operations
#[derive(Debug, Error)]
pub enum CrawldownError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Not an HTML document: {url} ({content_type})")]
    NotHtml { url: String, content_type: String },

    #[error("URL disallowed by robots.txt: {url}")]
    RobotsDenied { url: String },

    #[error("Redirect from {url} to {location} rejected: {reason}")]
    RedirectRejected {
        url: String,
        location: String,
        reason: &'static str,
    },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Conversion error: {0}")]
    Convert(#[from] convert::ConvertError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::RunState,
        to: state::RunState,
    },

    #[error("Task error: {0}")]
    Task(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Crawldown operations
pub type Result<T> = std::result::Result<T, CrawldownError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use convert::{generate_filename, localize_links};
pub use registry::{FrozenRegistry, PageRecord, PageRegistry, RegisterOutcome};
pub use state::RunState;
pub use url::{classify_link, is_excluded, normalize_url, LinkClass};
