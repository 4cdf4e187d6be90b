use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Command-line overrides applied on top of a loaded configuration
///
/// Every field is optional; `None` (or an empty list) keeps the value that
/// came from the configuration file or the built-in default.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub start_url: Option<String>,
    pub single_url: Option<String>,
    pub output_dir: Option<String>,
    pub max_depth: Option<u32>,
    pub parallelism: Option<u32>,
    pub request_timeout: Option<u64>,
    pub request_delay: Option<u64>,
    pub excluded_paths: Vec<String>,
    pub allowed_domains: Vec<String>,
    pub follow_external_links: bool,
    pub ignore_robots_txt: bool,
    pub user_agent: Option<String>,
}

/// Loads and parses a configuration file from the given path
///
/// The file is not validated here, since command-line flags may still fill in
/// required settings; see [`resolve_config`].
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use crawldown::config::load_config;
///
/// let config = load_config(Path::new("crawldown.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}

/// Merges command-line overrides into a configuration
///
/// A single-page URL takes precedence over the start URL and switches the
/// crawl into single-page mode. Repeatable flags extend the lists from the
/// file rather than replacing them.
pub fn apply_overrides(mut config: Config, overrides: Overrides) -> Config {
    if let Some(url) = overrides.start_url {
        config.start_url = Some(url);
    }

    if let Some(url) = overrides.single_url {
        config.start_url = Some(url);
        config.single_page = true;
    }

    if let Some(dir) = overrides.output_dir {
        config.output_dir = Some(dir);
    }

    let crawler = &mut config.crawler;
    if let Some(depth) = overrides.max_depth {
        crawler.max_depth = depth;
    }
    if let Some(parallelism) = overrides.parallelism {
        crawler.parallelism = parallelism;
    }
    if let Some(timeout) = overrides.request_timeout {
        crawler.request_timeout = timeout;
    }
    if let Some(delay) = overrides.request_delay {
        crawler.request_delay = delay;
    }
    if let Some(user_agent) = overrides.user_agent {
        crawler.user_agent = user_agent;
    }

    crawler.excluded_paths.extend(overrides.excluded_paths);
    crawler.allowed_domains.extend(overrides.allowed_domains);
    crawler.follow_external_links |= overrides.follow_external_links;
    crawler.ignore_robots_txt |= overrides.ignore_robots_txt;

    config
}

/// Builds the effective configuration from an optional file and overrides
///
/// # Returns
///
/// * `Ok(Config)` - Merged and validated configuration
/// * `Err(ConfigError)` - The file could not be read or parsed, or the
///   merged configuration is invalid
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<Config, ConfigError> {
    let base = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    let config = apply_overrides(base, overrides);
    validate(&config)?;

    Ok(config)
}
