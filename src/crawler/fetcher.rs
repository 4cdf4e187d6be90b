//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with user agent and timeout
//! - GET requests that follow redirects
//! - Status and Content-Type checks
//! - Error classification

use crate::config::CrawlerConfig;
use crate::{CrawldownError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

const MAX_REDIRECTS: usize = 10;

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value (empty if the server sent none)
    pub content_type: String,

    /// Page body
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```
/// use crawldown::config::CrawlerConfig;
/// use crawldown::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default());
/// assert!(client.is_ok());
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.request_timeout.min(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and checks that it is an HTML document
///
/// | Condition | Error |
/// |-----------|-------|
/// | Request exceeds the client timeout | `Timeout` |
/// | DNS, connection, TLS, redirect failures | `Http` |
/// | Non-2xx status | `HttpStatus` |
/// | Content-Type present but not HTML | `NotHtml` |
///
/// A response without a Content-Type header is treated as HTML.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(CrawldownError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return Err(CrawldownError::NotHtml {
            url: url.to_string(),
            content_type,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

fn is_html(content_type: &str) -> bool {
    content_type.is_empty() || content_type.to_ascii_lowercase().contains("html")
}

fn classify_error(url: &str, error: reqwest::Error) -> CrawldownError {
    if error.is_timeout() {
        CrawldownError::Timeout {
            url: url.to_string(),
        }
    } else {
        CrawldownError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        build_http_client(&CrawlerConfig::default()).unwrap()
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("application/xhtml+xml"));
        assert!(is_html("TEXT/HTML"));
        assert!(is_html(""));
        assert!(!is_html("application/pdf"));
        assert!(!is_html("image/png"));
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<html><body>hi</body></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let url = format!("{}/page", server.uri());
        let page = fetch_page(&client(), &url).await.unwrap();

        assert_eq!(page.status_code, 200);
        assert_eq!(page.final_url, url);
        assert!(page.body.contains("hi"));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = fetch_page(&client(), &format!("{}/missing", server.uri())).await;
        assert!(matches!(
            result,
            Err(CrawldownError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
            .mount(&server)
            .await;

        let result = fetch_page(&client(), &format!("{}/doc.pdf", server.uri())).await;
        assert!(matches!(result, Err(CrawldownError::NotHtml { .. })));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", format!("{}/new", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<p>moved</p>", "text/html"))
            .mount(&server)
            .await;

        let page = fetch_page(&client(), &format!("{}/old", server.uri()))
            .await
            .unwrap();
        assert_eq!(page.final_url, format!("{}/new", server.uri()));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<p>slow</p>", "text/html")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = CrawlerConfig {
            request_timeout: 1,
            ..CrawlerConfig::default()
        };
        let client = build_http_client(&config).unwrap();

        let result = fetch_page(&client, &format!("{}/slow", server.uri())).await;
        assert!(matches!(result, Err(CrawldownError::Timeout { .. })));
    }
}
