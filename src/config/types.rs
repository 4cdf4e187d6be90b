use serde::Deserialize;

/// Default maximum crawl depth
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Default number of concurrent fetches
pub const DEFAULT_PARALLELISM: u32 = 2;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 60;

/// Default delay between requests to the same host, in seconds
pub const DEFAULT_REQUEST_DELAY: u64 = 1;

/// Largest accepted delay between requests to the same host, in seconds
pub const MAX_REQUEST_DELAY: u64 = 3600;

/// Default user agent
pub const DEFAULT_USER_AGENT: &str = "CrawlDown/1.0";

/// Main configuration structure for Crawldown
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// URL the crawl starts from
    #[serde(rename = "start-url", default)]
    pub start_url: Option<String>,

    /// When true only the start URL is fetched and no links are followed
    #[serde(rename = "single-page", default)]
    pub single_page: bool,

    /// Directory the Markdown documents are written to
    #[serde(rename = "output-dir", default)]
    pub output_dir: Option<String>,

    #[serde(default)]
    pub crawler: CrawlerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum depth to crawl from the start URL (the start URL is depth 0)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of concurrent page fetches
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Minimum time between requests to the same host (seconds)
    #[serde(rename = "request-delay", default = "default_request_delay")]
    pub request_delay: u64,

    /// URL prefixes that are never crawled
    #[serde(rename = "excluded-paths", default)]
    pub excluded_paths: Vec<String>,

    /// Host patterns the crawl may visit (e.g. "example.com" or "*.example.com")
    #[serde(rename = "allowed-domains", default)]
    pub allowed_domains: Vec<String>,

    /// Follow links to other hosts when no allowed domains are configured
    #[serde(rename = "follow-external-links", default)]
    pub follow_external_links: bool,

    /// Skip robots.txt checks
    #[serde(rename = "ignore-robots-txt", default)]
    pub ignore_robots_txt: bool,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            parallelism: DEFAULT_PARALLELISM,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            request_delay: DEFAULT_REQUEST_DELAY,
            excluded_paths: Vec::new(),
            allowed_domains: Vec::new(),
            follow_external_links: false,
            ignore_robots_txt: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Builds a configuration for crawling `start_url` into `output_dir`
    pub fn new(start_url: impl Into<String>, output_dir: impl Into<String>) -> Self {
        Self {
            start_url: Some(start_url.into()),
            output_dir: Some(output_dir.into()),
            ..Self::default()
        }
    }
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_parallelism() -> u32 {
    DEFAULT_PARALLELISM
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_request_delay() -> u64 {
    DEFAULT_REQUEST_DELAY
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
