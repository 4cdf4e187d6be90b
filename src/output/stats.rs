//! Run statistics
//!
//! `CrawlStats` is a set of atomic counters shared by the crawl tasks and
//! the document writer. `snapshot` turns it into a plain `CrawlStatistics`
//! value for reporting.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters for a single run
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_fetched: AtomicU64,
    pages_registered: AtomicU64,
    duplicates_discarded: AtomicU64,
    fetch_errors: AtomicU64,
    robots_denied: AtomicU64,
    conversion_errors: AtomicU64,
    links_skipped: AtomicU64,
    links_excluded: AtomicU64,
    links_out_of_scope: AtomicU64,
    links_beyond_depth: AtomicU64,
    documents_written: AtomicU64,
    write_errors: AtomicU64,
    filename_collisions: AtomicU64,
}

macro_rules! counter {
    ($($inc:ident => $field:ident),* $(,)?) => {
        $(
            pub fn $inc(&self) {
                self.$field.fetch_add(1, Ordering::Relaxed);
            }
        )*
    };
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    counter! {
        record_page_fetched => pages_fetched,
        record_page_registered => pages_registered,
        record_duplicate => duplicates_discarded,
        record_fetch_error => fetch_errors,
        record_robots_denied => robots_denied,
        record_conversion_error => conversion_errors,
        record_link_skipped => links_skipped,
        record_link_excluded => links_excluded,
        record_link_out_of_scope => links_out_of_scope,
        record_link_beyond_depth => links_beyond_depth,
        record_document_written => documents_written,
        record_write_error => write_errors,
        record_filename_collision => filename_collisions,
    }

    /// Reads all counters
    ///
    /// Counters are read one by one, so a snapshot taken while tasks are
    /// still running is not a consistent cut.
    pub fn snapshot(&self) -> CrawlStatistics {
        let get = |c: &AtomicU64| c.load(Ordering::Relaxed);

        CrawlStatistics {
            pages_fetched: get(&self.pages_fetched),
            pages_registered: get(&self.pages_registered),
            duplicates_discarded: get(&self.duplicates_discarded),
            fetch_errors: get(&self.fetch_errors),
            robots_denied: get(&self.robots_denied),
            conversion_errors: get(&self.conversion_errors),
            links_skipped: get(&self.links_skipped),
            links_excluded: get(&self.links_excluded),
            links_out_of_scope: get(&self.links_out_of_scope),
            links_beyond_depth: get(&self.links_beyond_depth),
            documents_written: get(&self.documents_written),
            write_errors: get(&self.write_errors),
            filename_collisions: get(&self.filename_collisions),
        }
    }
}

/// Crawl statistics summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    pub pages_fetched: u64,
    pub pages_registered: u64,
    pub duplicates_discarded: u64,
    pub fetch_errors: u64,
    pub robots_denied: u64,
    pub conversion_errors: u64,
    pub links_skipped: u64,
    pub links_excluded: u64,
    pub links_out_of_scope: u64,
    pub links_beyond_depth: u64,
    pub documents_written: u64,
    pub write_errors: u64,
    pub filename_collisions: u64,
}

impl CrawlStatistics {
    /// Errors of every kind: fetch, robots, conversion, write
    pub fn total_errors(&self) -> u64 {
        self.fetch_errors + self.robots_denied + self.conversion_errors + self.write_errors
    }

    /// Share of fetched pages that ended up registered, in percent
    pub fn success_rate(&self) -> f64 {
        if self.pages_fetched == 0 {
            0.0
        } else {
            (self.pages_registered as f64 / self.pages_fetched as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Pages:");
    println!("  Fetched: {}", stats.pages_fetched);
    println!("  Registered: {}", stats.pages_registered);
    println!("  Duplicates discarded: {}", stats.duplicates_discarded);
    println!();

    println!("Links:");
    println!("  Skipped (non-document): {}", stats.links_skipped);
    println!("  Excluded by path: {}", stats.links_excluded);
    println!("  Out of domain scope: {}", stats.links_out_of_scope);
    println!("  Beyond max depth: {}", stats.links_beyond_depth);
    println!();

    if stats.total_errors() > 0 {
        println!("Error Summary:");
        println!("  Fetch errors: {}", stats.fetch_errors);
        println!("  Denied by robots.txt: {}", stats.robots_denied);
        println!("  Conversion errors: {}", stats.conversion_errors);
        println!("  Write errors: {}", stats.write_errors);
        println!();
    }

    println!("Output:");
    println!("  Documents written: {}", stats.documents_written);
    if stats.filename_collisions > 0 {
        println!("  Filename collisions: {}", stats.filename_collisions);
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} fetched pages registered)",
        stats.success_rate(),
        stats.pages_registered,
        stats.pages_fetched
    );
}
