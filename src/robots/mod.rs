//! Robots.txt handling module
//!
//! This module fetches, caches and evaluates robots.txt files. A host whose
//! robots.txt cannot be fetched, or answers with a non-2xx status, is
//! treated as allowing everything.

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::RobotsRules;

use reqwest::Client;
use tracing::debug;
use url::Url;

/// Returns the robots.txt location for a URL's origin
///
/// # Examples
///
/// ```
/// use crawldown::robots::robots_url;
/// use url::Url;
///
/// let page = Url::parse("http://127.0.0.1:8080/docs/page?x=1").unwrap();
/// assert_eq!(robots_url(&page).as_deref(), Some("http://127.0.0.1:8080/robots.txt"));
/// ```
pub fn robots_url(url: &Url) -> Option<String> {
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.join("/robots.txt").ok().map(|u| u.to_string())
}

/// Fetches and parses robots.txt
///
/// Never fails: transport errors, non-2xx responses and unreadable bodies
/// all yield [`RobotsRules::allow_all`].
///
/// # Arguments
///
/// * `client` - The HTTP client (carries user agent and timeout)
/// * `location` - Absolute URL of the robots.txt file
pub async fn fetch_robots(client: &Client, location: &str) -> RobotsRules {
    let response = match client.get(location).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!("Could not fetch {}: {}", location, e);
            return RobotsRules::allow_all();
        }
    };

    if !response.status().is_success() {
        debug!("{} answered {}, allowing all", location, response.status());
        return RobotsRules::allow_all();
    }

    match response.text().await {
        Ok(body) => RobotsRules::from_content(&body),
        Err(e) => {
            debug!("Could not read {}: {}", location, e);
            RobotsRules::allow_all()
        }
    }
}
