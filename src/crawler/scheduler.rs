//! Scheduler for managing the crawl frontier and politeness delays
//!
//! This module handles:
//! - Frontier ordering (shallowest depth first, FIFO within a depth)
//! - Deduplication of scheduled targets by registry key
//! - Per-host delays between dispatches, with random jitter
//! - Integrating robots.txt crawl delays

use crate::crawler::CrawlTarget;
use crate::state::HostState;
use crate::url::registry_key;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use url::Url;

/// A target waiting in the frontier
#[derive(Debug, Clone)]
struct QueuedTarget {
    target: CrawlTarget,
    /// Insertion order, for FIFO within a depth
    sequence: u64,
}

// BinaryHeap is a max-heap: reverse so that lower depth, then lower
// sequence, pops first
impl Ord for QueuedTarget {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .target
            .depth
            .cmp(&self.target.depth)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueuedTarget {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedTarget {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Eq for QueuedTarget {}

/// Scheduler manages the frontier queue and per-host politeness
///
/// Owned by the coordinator loop; nothing in here is shared with tasks.
pub struct Scheduler {
    frontier: BinaryHeap<QueuedTarget>,

    /// Registry keys of every target ever enqueued
    scheduled: HashSet<String>,

    host_states: HashMap<String, HostState>,

    /// Configured delay between dispatches to one host
    delay: Duration,

    next_sequence: u64,
}

impl Scheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            frontier: BinaryHeap::new(),
            scheduled: HashSet::new(),
            host_states: HashMap::new(),
            delay,
            next_sequence: 0,
        }
    }

    /// Adds a target unless its registry key was scheduled before
    ///
    /// # Returns
    ///
    /// * `true` - The target was added to the frontier
    /// * `false` - The target was already scheduled at some point in this run
    pub fn enqueue(&mut self, target: CrawlTarget) -> bool {
        let key = registry_key(target.url.as_str());
        if !self.scheduled.insert(key) {
            trace!("Already scheduled: {}", target.url);
            return false;
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.frontier.push(QueuedTarget { target, sequence });
        true
    }

    /// Removes and returns the next target to dispatch
    pub fn pop_next(&mut self) -> Option<CrawlTarget> {
        self.frontier.pop().map(|queued| queued.target)
    }

    /// Records a robots.txt crawl delay for the URL's host
    pub fn set_robots_delay(&mut self, url: &Url, delay: Option<Duration>) {
        self.host_state_mut(url).robots_delay = delay;
    }

    /// Returns how long to wait before the URL's host may receive a request
    ///
    /// The wait is computed from the effective delay (configured delay or
    /// robots.txt crawl delay, whichever is larger) plus a random jitter of
    /// up to half that delay.
    pub fn wait_time(&mut self, url: &Url, now: Instant) -> Option<Duration> {
        let configured = self.delay;
        let state = self.host_state_mut(url);
        let delay = state.effective_delay(configured);
        if delay.is_zero() {
            return None;
        }

        let delay = delay.saturating_add(jitter(delay));
        state.time_until_next_request(delay, now)
    }

    /// Sleeps until the URL's host may receive a request
    pub async fn wait_for_host(&mut self, url: &Url) {
        if let Some(wait) = self.wait_time(url, Instant::now()) {
            debug!("Waiting {:?} before requesting {}", wait, url);
            tokio::time::sleep(wait).await;
        }
    }

    /// Records that a request to the URL's host was dispatched now
    pub fn record_dispatch(&mut self, url: &Url) {
        self.host_state_mut(url).record_request(Instant::now());
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Number of distinct targets scheduled so far
    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    pub fn host_state(&self, url: &Url) -> Option<&HostState> {
        self.host_states.get(&host_key(url))
    }

    fn host_state_mut(&mut self, url: &Url) -> &mut HostState {
        self.host_states.entry(host_key(url)).or_default()
    }
}

/// Hosts are keyed by origin, so an explicit port is a separate host
fn host_key(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Uniform random duration in `[0, delay / 2]`
fn jitter(delay: Duration) -> Duration {
    let max = delay / 2;
    if max.is_zero() {
        return Duration::ZERO;
    }
    let max_millis = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    let millis = rand::thread_rng().gen_range(0..=max_millis);
    Duration::from_millis(millis)
}
