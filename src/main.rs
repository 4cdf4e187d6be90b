//! Crawldown main entry point
//!
//! This is the command-line interface for the Crawldown website-to-Markdown
//! crawler.

use anyhow::Context;
use clap::Parser;
use crawldown::config::{resolve_config, Config, Overrides};
use crawldown::crawler::crawl;
use crawldown::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crawldown: crawl a website into offline Markdown
///
/// Crawldown fetches pages starting from a URL, converts their main content
/// to Markdown and rewrites links between crawled pages to point at the
/// local files.
#[derive(Parser, Debug)]
#[command(name = "crawldown")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a website and convert it to linked Markdown files", long_about = None)]
struct Cli {
    /// The starting URL to crawl (not needed with --single)
    #[arg(short = 'u', long = "url", value_name = "URL")]
    url: Option<String>,

    /// Download a single page instead of crawling (overrides --url)
    #[arg(short = 's', long = "single", value_name = "URL")]
    single: Option<String>,

    /// Directory the Markdown files are written to
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    output: Option<String>,

    /// Maximum crawl depth [default: 2]
    #[arg(short = 'd', long = "depth")]
    depth: Option<u32>,

    /// URL prefix to exclude from crawling (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "PREFIX")]
    exclude: Vec<String>,

    /// Request timeout in seconds [default: 60]
    #[arg(short = 't', long = "timeout", value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Delay between requests to the same host, in seconds [default: 1]
    #[arg(long = "delay", value_name = "SECONDS")]
    delay: Option<u64>,

    /// Number of concurrent fetches [default: 2]
    #[arg(short = 'p', long = "parallelism")]
    parallelism: Option<u32>,

    /// Do not fetch or honor robots.txt
    #[arg(long)]
    ignore_robots: bool,

    /// Follow links to other hosts (when no --allow-domain is given)
    #[arg(long)]
    follow_external: bool,

    /// Host pattern the crawl may visit, e.g. docs.example.com or *.example.com (repeatable)
    #[arg(long = "allow-domain", value_name = "PATTERN")]
    allow_domain: Vec<String>,

    /// User agent sent with every request [default: CrawlDown/1.0]
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Path to a TOML configuration file; flags override its values
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            start_url: self.url.clone(),
            single_url: self.single.clone(),
            output_dir: self.output.clone(),
            max_depth: self.depth,
            parallelism: self.parallelism,
            request_timeout: self.timeout,
            request_delay: self.delay,
            excluded_paths: self.exclude.clone(),
            allowed_domains: self.allow_domain.clone(),
            follow_external_links: self.follow_external,
            ignore_robots_txt: self.ignore_robots,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(cli.config.as_deref(), cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e).context("failed to load configuration");
        }
    };

    log_settings(&config);

    let report = match crawl(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if !cli.quiet {
        println!();
        print_statistics(&report.statistics);
    }

    tracing::info!(
        "Successfully processed {} pages",
        report.write.written.len()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawldown=info,warn"),
            1 => EnvFilter::new("crawldown=debug,info"),
            2 => EnvFilter::new("crawldown=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn log_settings(config: &Config) {
    let crawler = &config.crawler;

    tracing::info!(
        "Starting crawl of: {}",
        config.start_url.as_deref().unwrap_or_default()
    );
    tracing::info!(
        "Output directory: {}",
        config.output_dir.as_deref().unwrap_or_default()
    );
    tracing::info!(
        "Max depth: {}, parallelism: {}, timeout: {}s, delay: {}s",
        crawler.max_depth,
        crawler.parallelism,
        crawler.request_timeout,
        crawler.request_delay
    );
    if !crawler.excluded_paths.is_empty() {
        tracing::info!("Excluded paths: {:?}", crawler.excluded_paths);
    }
    if !crawler.allowed_domains.is_empty() {
        tracing::info!("Allowed domains: {:?}", crawler.allowed_domains);
    }
    if crawler.ignore_robots_txt {
        tracing::info!("Ignoring robots.txt");
    }
}
