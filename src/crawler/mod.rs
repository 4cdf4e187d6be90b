//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with status and content-type checks
//! - HTML parsing for title, main content and links
//! - Frontier scheduling and per-host delays
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{Coordinator, CrawlTarget, Page, PageCallback};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use parser::{extract_main_content, parse_page, ParsedPage};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::convert::localize_all;
use crate::output::{write_documents, CrawlStatistics, CrawlStats, DirectoryWriter, WriteSummary};
use crate::{ConfigError, Result};
use std::sync::Arc;
use tracing::info;

/// Outcome of a complete run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub statistics: CrawlStatistics,
    pub write: WriteSummary,
}

/// Runs a complete crawl operation
///
/// This is the main entry point. It will:
/// 1. Create the output directory
/// 2. Crawl and convert every reachable page
/// 3. Freeze the page registry
/// 4. Rewrite links between crawled pages to local file names
/// 5. Write one Markdown file per page
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The run completed; individual pages may still have failed
/// * `Err(CrawldownError)` - The output directory could not be created or
///   the crawl could not start
///
/// # Example
///
/// ```no_run
/// use crawldown::config::Config;
/// use crawldown::crawler::crawl;
///
/// # async fn example() -> crawldown::Result<()> {
/// let config = Config::new("https://example.com/", "./docs");
/// let report = crawl(config).await?;
/// println!("wrote {} documents", report.write.written.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config) -> Result<CrawlReport> {
    let output_dir = config
        .output_dir
        .clone()
        .ok_or(ConfigError::Missing("output directory"))?;
    let writer = DirectoryWriter::create(&output_dir)?;

    let stats = Arc::new(CrawlStats::new());

    if config.single_page {
        info!("Single-page mode: only the start URL is fetched");
    }

    let frozen = Coordinator::new(&config, Arc::clone(&stats))?.run().await?;

    info!("Localizing links across {} documents", frozen.len());

    let documents = localize_all(&frozen);
    let write = write_documents(&documents, &writer, &stats);

    Ok(CrawlReport {
        statistics: stats.snapshot(),
        write,
    })
}
