//! Per-host robots.txt cache
//!
//! Each host's robots.txt is fetched at most once per run in the common
//! case. Two tasks hitting a new host at the same moment may both fetch it;
//! the first stored result wins.

use crate::robots::{fetch_robots, robots_url, RobotsRules};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use url::Url;

#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: Mutex<HashMap<String, Arc<RobotsRules>>>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached rules for the URL's origin, if any
    pub fn get(&self, url: &Url) -> Option<Arc<RobotsRules>> {
        let key = robots_url(url)?;
        self.lock().get(&key).cloned()
    }

    /// Stores rules for the URL's origin unless rules are already cached
    ///
    /// Returns the rules that end up in the cache.
    pub fn insert(&self, url: &Url, rules: RobotsRules) -> Arc<RobotsRules> {
        let rules = Arc::new(rules);
        let Some(key) = robots_url(url) else {
            return rules;
        };

        self.lock().entry(key).or_insert(rules).clone()
    }

    /// Returns the rules for the URL's origin, fetching them on a miss
    ///
    /// The lock is not held while fetching.
    pub async fn get_or_fetch(&self, client: &Client, url: &Url) -> Arc<RobotsRules> {
        if let Some(rules) = self.get(url) {
            return rules;
        }

        let rules = match robots_url(url) {
            Some(location) => fetch_robots(client, &location).await,
            None => RobotsRules::allow_all(),
        };
        debug!(
            "Cached robots.txt for {} (allow all: {})",
            url.host_str().unwrap_or_default(),
            rules.is_allow_all()
        );

        self.insert(url, rules)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<RobotsRules>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_entries_are_per_origin() {
        let cache = RobotsCache::new();
        cache.insert(
            &url("https://example.com/a"),
            RobotsRules::from_content("User-agent: *\nDisallow: /"),
        );

        assert!(cache.get(&url("https://example.com/other/page")).is_some());
        assert!(cache.get(&url("https://example.org/")).is_none());
        assert!(cache.get(&url("https://example.com:8443/")).is_none());
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = RobotsCache::new();
        let page = url("https://example.com/");

        cache.insert(&page, RobotsRules::from_content("User-agent: *\nDisallow: /"));
        let kept = cache.insert(&page, RobotsRules::allow_all());

        assert!(!kept.is_allow_all());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_get_or_fetch_uses_cached_entry() {
        let cache = RobotsCache::new();
        // nothing listens on port 9; a fetch would fall back to allow all
        let page = url("http://127.0.0.1:9/page");
        cache.insert(&page, RobotsRules::from_content("User-agent: *\nDisallow: /"));

        let rules = cache.get_or_fetch(&Client::new(), &page).await;
        assert!(!rules.is_allowed(page.as_str(), "CrawlDown/1.0"));
    }

    #[tokio::test]
    async fn test_get_or_fetch_unreachable_allows_all() {
        let cache = RobotsCache::new();
        let page = url("http://127.0.0.1:9/page");

        let rules = cache.get_or_fetch(&Client::new(), &page).await;
        assert!(rules.is_allow_all());
        assert!(!cache.is_empty());
    }
}
