use std::time::{Duration, Instant};

/// Tracks politeness state for a single host during crawling
#[derive(Debug, Clone, Default)]
pub struct HostState {
    /// Number of fetches dispatched to this host
    pub request_count: u32,

    /// When the last fetch to this host was dispatched
    pub last_request_time: Option<Instant>,

    /// Crawl-delay advertised by the host's robots.txt, if any
    pub robots_delay: Option<Duration>,
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the delay to honor between dispatches to this host
    ///
    /// This is the larger of the configured delay and the robots.txt
    /// crawl delay.
    pub fn effective_delay(&self, configured: Duration) -> Duration {
        match self.robots_delay {
            Some(robots) => configured.max(robots),
            None => configured,
        }
    }

    /// Calculates the time until the next dispatch may happen
    ///
    /// Returns None if a dispatch can happen now.
    pub fn time_until_next_request(&self, delay: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < delay {
            Some(delay - elapsed)
        } else {
            None
        }
    }

    /// Records that a fetch was dispatched to this host
    pub fn record_request(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(now);
    }
}
