//! Configuration module for Crawldown
//!
//! Settings come from an optional TOML file layered under command-line
//! flags. The merged result is validated before any network activity.
//!
//! # Example
//!
//! ```no_run
//! use crawldown::config::{resolve_config, Overrides};
//! use std::path::Path;
//!
//! let config = resolve_config(
//!     Some(Path::new("crawldown.toml")),
//!     Overrides {
//!         max_depth: Some(1),
//!         ..Overrides::default()
//!     },
//! )
//! .unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DEFAULT_MAX_DEPTH, DEFAULT_PARALLELISM, DEFAULT_REQUEST_DELAY,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT, MAX_REQUEST_DELAY,
};

// Re-export parser functions
pub use parser::{apply_overrides, load_config, parse_config, resolve_config, Overrides};
pub use validation::validate;
