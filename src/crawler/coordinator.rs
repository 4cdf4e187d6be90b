//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns the frontier and runs the dispatch loop; each fetch
//! runs as its own task holding a semaphore permit. A task checks
//! robots.txt, fetches and parses the page, converts it, registers it, and
//! hands the links it accepted back to the loop. A redirect target must pass
//! the same scope, exclusion and robots checks as a discovered link.
//!
//! `run` returns only once the frontier is empty and no task is in flight,
//! which makes the returned `FrozenRegistry` the complete phase one result.

use crate::config::Config;
use crate::convert::{document_header, generate_filename, DocumentConverter, MarkdownConverter};
use crate::crawler::{build_http_client, fetch_page, parse_page};
use crate::output::CrawlStats;
use crate::registry::{FrozenRegistry, PageRecord, PageRegistry, RegisterOutcome};
use crate::robots::RobotsCache;
use crate::state::RunState;
use crate::url::{
    classify_link, is_excluded, normalize_url, parse_crawl_root, registry_key, DomainScope,
    LinkClass,
};
use crate::{ConfigError, CrawldownError, Result};
use futures::FutureExt;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};
use url::Url;

use super::scheduler::Scheduler;

/// A URL scheduled for fetching, tagged with its depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// Absolute URL without fragment
    pub url: Url,

    /// Link distance from the start URL
    pub depth: u32,
}

impl CrawlTarget {
    pub fn new(mut url: Url, depth: u32) -> Self {
        url.set_fragment(None);
        Self { url, depth }
    }
}

/// A fetched HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Normalized response URL (after redirects)
    pub canonical_url: String,

    pub title: String,

    /// Main content HTML
    pub raw_content: String,
}

/// Called on the crawl task after each page is registered (or found to be a
/// duplicate)
pub type PageCallback = Arc<dyn Fn(&Page, RegisterOutcome) + Send + Sync>;

/// Everything a crawl task needs, shared read-only between tasks
struct CrawlContext {
    client: Client,
    robots: RobotsCache,
    converter: Arc<dyn DocumentConverter>,
    registry: Arc<PageRegistry>,
    stats: Arc<CrawlStats>,
    callback: Option<PageCallback>,
    scope: DomainScope,
    excluded_paths: Vec<String>,
    max_depth: u32,
    single_page: bool,
    respect_robots: bool,
    user_agent: String,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    context: CrawlContext,
    scheduler: Scheduler,
    semaphore: Arc<Semaphore>,
    root: Url,
    state: RunState,
}

impl Coordinator {
    /// Creates a coordinator for the configured start URL
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `stats` - Counters updated by crawl tasks
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawldownError)` - Missing or invalid start URL, or the HTTP
    ///   client could not be built
    pub fn new(config: &Config, stats: Arc<CrawlStats>) -> Result<Self> {
        let start = config
            .start_url
            .as_deref()
            .ok_or(ConfigError::Missing("start URL"))?;
        let root = parse_crawl_root(start)?;

        let crawler = &config.crawler;
        let client = build_http_client(crawler)?;

        let context = CrawlContext {
            client,
            robots: RobotsCache::new(),
            converter: Arc::new(MarkdownConverter::new()),
            registry: Arc::new(PageRegistry::new()),
            stats,
            callback: None,
            scope: DomainScope::for_root(
                &root,
                &crawler.allowed_domains,
                crawler.follow_external_links,
            ),
            excluded_paths: crawler.excluded_paths.clone(),
            max_depth: crawler.max_depth,
            single_page: config.single_page,
            respect_robots: !crawler.ignore_robots_txt,
            user_agent: crawler.user_agent.clone(),
        };

        Ok(Self {
            context,
            scheduler: Scheduler::new(Duration::from_secs(crawler.request_delay)),
            semaphore: Arc::new(Semaphore::new(crawler.parallelism.max(1) as usize)),
            root,
            state: RunState::Idle,
        })
    }

    /// Sets the callback invoked for every completed page
    pub fn with_callback(mut self, callback: PageCallback) -> Self {
        self.context.callback = Some(callback);
        self
    }

    /// Replaces the HTML to Markdown converter
    pub fn with_converter(mut self, converter: Arc<dyn DocumentConverter>) -> Self {
        self.context.converter = converter;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs the crawl to completion
    ///
    /// # Returns
    ///
    /// * `Ok(FrozenRegistry)` - Every page registered during the run
    /// * `Err(CrawldownError)` - The loop itself failed; per-page errors never
    ///   end up here
    pub async fn run(self) -> Result<FrozenRegistry> {
        let Coordinator {
            context,
            mut scheduler,
            semaphore,
            root,
            mut state,
        } = self;
        let context = Arc::new(context);
        let registry = Arc::clone(&context.registry);

        transition(&mut state, RunState::Running)?;
        info!("Starting crawl of {}", root);

        scheduler.enqueue(CrawlTarget::new(root, 0));

        let mut tasks: JoinSet<Vec<CrawlTarget>> = JoinSet::new();

        loop {
            while let Some(joined) = tasks.join_next().now_or_never().flatten() {
                absorb(&mut scheduler, joined);
            }

            if let Some(target) = scheduler.pop_next() {
                if state == RunState::Draining {
                    transition(&mut state, RunState::Running)?;
                }

                let permit = Arc::clone(&semaphore)
                    .acquire_owned()
                    .await
                    .map_err(|e| CrawldownError::Task(e.to_string()))?;

                scheduler.set_robots_delay(&target.url, known_robots_delay(&context, &target.url));
                scheduler.wait_for_host(&target.url).await;
                scheduler.record_dispatch(&target.url);

                debug!("Dispatching {} (depth {})", target.url, target.depth);
                let context = Arc::clone(&context);
                tasks.spawn(async move {
                    let _permit = permit;
                    process_target(&context, target).await
                });
            } else if !tasks.is_empty() {
                if state == RunState::Running {
                    transition(&mut state, RunState::Draining)?;
                }
                if let Some(joined) = tasks.join_next().await {
                    absorb(&mut scheduler, joined);
                }
            } else {
                transition(&mut state, RunState::Done)?;
                break;
            }
        }

        // every task has been joined, so this is the last context handle
        drop(context);
        let frozen = match Arc::try_unwrap(registry) {
            Ok(registry) => registry.freeze(),
            Err(shared) => FrozenRegistry::from_snapshot(shared.snapshot()),
        };

        info!(
            "Crawl finished: {} pages registered, {} URLs scheduled",
            frozen.len(),
            scheduler.scheduled_count()
        );
        Ok(frozen)
    }
}

fn absorb(scheduler: &mut Scheduler, joined: std::result::Result<Vec<CrawlTarget>, JoinError>) {
    match joined {
        Ok(discovered) => {
            for target in discovered {
                scheduler.enqueue(target);
            }
        }
        Err(e) => error!("Crawl task failed: {}", e),
    }
}

/// Crawl-delay from robots.txt, once the host's rules are cached
fn known_robots_delay(context: &CrawlContext, url: &Url) -> Option<Duration> {
    if !context.respect_robots {
        return None;
    }
    context
        .robots
        .get(url)
        .and_then(|rules| rules.crawl_delay(&context.user_agent))
}

fn transition(state: &mut RunState, to: RunState) -> Result<()> {
    if !state.can_transition_to(to) {
        return Err(CrawldownError::InvalidTransition { from: *state, to });
    }
    debug!("Run state {} -> {}", state, to);
    *state = to;
    Ok(())
}

/// Processes one target, returning the links it accepted
///
/// Failures are logged and counted here and never leave the task.
async fn process_target(context: &CrawlContext, target: CrawlTarget) -> Vec<CrawlTarget> {
    match fetch_and_register(context, &target).await {
        Ok(discovered) => discovered,
        Err(e) => {
            match &e {
                CrawldownError::RobotsDenied { url } => {
                    info!("Skipping {}: disallowed by robots.txt", url);
                    context.stats.record_robots_denied();
                }
                CrawldownError::RedirectRejected { .. } => {
                    info!("Skipping {}: {}", target.url, e);
                }
                _ => {
                    warn!("Failed to crawl {}: {}", target.url, e);
                    context.stats.record_fetch_error();
                }
            }
            Vec::new()
        }
    }
}

async fn fetch_and_register(context: &CrawlContext, target: &CrawlTarget) -> Result<Vec<CrawlTarget>> {
    let url = target.url.as_str();

    check_robots(context, &target.url).await?;

    let fetched = fetch_page(&context.client, url).await?;
    context.stats.record_page_fetched();

    // Relative links resolve against the URL the content was served from
    let final_url = Url::parse(&fetched.final_url).unwrap_or_else(|_| target.url.clone());
    if final_url != target.url {
        check_redirect(context, &target.url, &final_url).await?;
    }

    let parsed = parse_page(&fetched.body);
    let discovered = if context.single_page {
        Vec::new()
    } else {
        discover_links(context, &final_url, target.depth, &parsed.links)
    };

    let page = Page {
        canonical_url: normalize_url(final_url.as_str()),
        title: parsed.title,
        raw_content: parsed.main_content,
    };

    let markdown = match context.converter.convert(&page.raw_content) {
        Ok(markdown) => markdown,
        Err(e) => {
            warn!("Failed to convert {}: {}", page.canonical_url, e);
            context.stats.record_conversion_error();
            return Ok(discovered);
        }
    };
    let converted_markup = format!(
        "{}{}",
        document_header(&page.title, &page.canonical_url),
        markdown
    );

    let key = registry_key(&page.canonical_url);
    let record = PageRecord {
        normalized_url: key.clone(),
        original_url: page.canonical_url.clone(),
        generated_filename: generate_filename(&page.canonical_url),
        converted_markup,
    };

    let outcome = context.registry.register(&key, record);
    match outcome {
        RegisterOutcome::Inserted => {
            info!("Crawled {} (depth {})", page.canonical_url, target.depth);
            context.stats.record_page_registered();
        }
        RegisterOutcome::AlreadyPresent => {
            debug!("Discarding duplicate {}", page.canonical_url);
            context.stats.record_duplicate();
        }
    }

    if let Some(callback) = &context.callback {
        callback(&page, outcome);
    }

    Ok(discovered)
}

async fn check_robots(context: &CrawlContext, url: &Url) -> Result<()> {
    if !context.respect_robots {
        return Ok(());
    }
    let rules = context.robots.get_or_fetch(&context.client, url).await;
    if rules.is_allowed(url.as_str(), &context.user_agent) {
        Ok(())
    } else {
        Err(CrawldownError::RobotsDenied {
            url: url.to_string(),
        })
    }
}

/// Applies the rules a discovered link passes through to a redirect target
async fn check_redirect(context: &CrawlContext, from: &Url, to: &Url) -> Result<()> {
    let reject = |reason: &'static str| CrawldownError::RedirectRejected {
        url: from.to_string(),
        location: to.to_string(),
        reason,
    };

    if !context.scope.allows(to) {
        context.stats.record_link_out_of_scope();
        return Err(reject("out of scope"));
    }
    if is_excluded(to.as_str(), &context.excluded_paths) {
        context.stats.record_link_excluded();
        return Err(reject("excluded path"));
    }
    check_robots(context, to).await
}

/// Filters raw hrefs down to the targets worth scheduling
fn discover_links(
    context: &CrawlContext,
    base: &Url,
    depth: u32,
    hrefs: &[String],
) -> Vec<CrawlTarget> {
    let mut accepted = Vec::new();
    let next_depth = depth + 1;

    for href in hrefs {
        if let LinkClass::Skip(reason) = classify_link(href) {
            debug!("Skipping link {:?} ({:?})", href, reason);
            context.stats.record_link_skipped();
            continue;
        }

        let Ok(mut resolved) = base.join(href.trim()) else {
            debug!("Skipping unresolvable link {:?}", href);
            context.stats.record_link_skipped();
            continue;
        };
        resolved.set_fragment(None);

        if is_excluded(resolved.as_str(), &context.excluded_paths) {
            debug!("Excluded by path: {}", resolved);
            context.stats.record_link_excluded();
            continue;
        }

        if !context.scope.allows(&resolved) {
            debug!("Out of scope: {}", resolved);
            context.stats.record_link_out_of_scope();
            continue;
        }

        if next_depth > context.max_depth {
            debug!("Beyond max depth {}: {}", context.max_depth, resolved);
            context.stats.record_link_beyond_depth();
            continue;
        }

        accepted.push(CrawlTarget::new(resolved, next_depth));
    }

    accepted
}
