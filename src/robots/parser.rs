//! Robots.txt rule evaluation
//!
//! This module wraps the robotstxt crate for permission checks and reads the
//! `Crawl-delay` directive, which the matcher does not expose.

use robotstxt::DefaultMatcher;
use std::time::Duration;

/// Rules from one host's robots.txt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRules {
    /// Raw robots.txt content (empty means allow all)
    content: String,
}

impl RobotsRules {
    /// Creates rules from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Creates permissive rules
    ///
    /// Used whenever robots.txt is missing or cannot be fetched.
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn is_allow_all(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Checks if an absolute URL may be fetched by `user_agent`
    ///
    /// Groups are matched against the product token of the user agent.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.is_allow_all() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, &product_token(user_agent), url)
    }

    /// Returns the `Crawl-delay` that applies to `user_agent`
    ///
    /// A group naming the agent wins over the `*` group. Agent names match
    /// case-insensitively against the product token of the user agent
    /// (`CrawlDown` for `CrawlDown/1.0`). Negative or unparsable values
    /// are ignored.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<Duration> {
        if self.is_allow_all() {
            return None;
        }

        let product = product_token(user_agent);

        let mut group: Vec<String> = Vec::new();
        let mut group_open = false;
        let mut wildcard_delay = None;
        let mut agent_delay = None;

        for line in self.content.lines() {
            let line = match line.split_once('#') {
                Some((before, _)) => before,
                None => line,
            }
            .trim();

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // consecutive user-agent lines share one group
                    if !group_open {
                        group.clear();
                        group_open = true;
                    }
                    group.push(value.to_ascii_lowercase());
                }
                "crawl-delay" => {
                    group_open = false;

                    let Some(delay) = parse_delay(value) else {
                        continue;
                    };
                    if group.iter().any(|ua| *ua == product) {
                        agent_delay.get_or_insert(delay);
                    } else if group.iter().any(|ua| ua == "*") {
                        wildcard_delay.get_or_insert(delay);
                    }
                }
                _ => group_open = false,
            }
        }

        agent_delay.or(wildcard_delay)
    }
}

fn product_token(user_agent: &str) -> String {
    user_agent
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '-' || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Longest crawl delay honored; larger advertised values are clamped
const MAX_CRAWL_DELAY_SECS: f64 = 3600.0;

fn parse_delay(value: &str) -> Option<Duration> {
    let seconds: f64 = value.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(seconds.min(MAX_CRAWL_DELAY_SECS)).ok()
}
