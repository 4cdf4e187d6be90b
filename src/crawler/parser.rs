//! HTML parser for extracting page content and links
//!
//! This module handles parsing HTML content to extract:
//! - The page title
//! - The main content block, as HTML
//! - Raw anchor hrefs for link discovery

use scraper::{Html, Selector};

/// Selectors tried in order when looking for the main content
const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    ".content",
    "#content",
    ".main-content",
    "#main-content",
    "body",
];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Text of the `<title>` element, trimmed (empty if missing)
    pub title: String,

    /// Inner HTML of the main content element
    pub main_content: String,

    /// `href` values of all anchors, as written in the page
    pub links: Vec<String>,
}

/// Parses an HTML document
///
/// Links are returned unresolved and unfiltered; classification and
/// resolution happen in the crawl task.
///
/// # Example
///
/// ```
/// use crawldown::crawler::parse_page;
///
/// let html = r#"<html><head><title>Test</title></head>
///     <body><main><a href="/page">Link</a></main></body></html>"#;
/// let parsed = parse_page(html);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links, vec!["/page".to_string()]);
/// ```
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        main_content: extract_main_content(&document),
        links: extract_links(&document),
    }
}

fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Returns the inner HTML of the first main-content candidate that has any
///
/// Only the first element matching each selector is considered.
pub fn extract_main_content(document: &Html) -> String {
    for css in MAIN_CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };

        if let Some(element) = document.select(&selector).next() {
            let inner = element.inner_html();
            if !inner.trim().is_empty() {
                return inner;
            }
        }
    }

    String::new()
}

fn extract_links(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let parsed = parse_page("<html><head><title>  Test Page  </title></head><body></body></html>");
        assert_eq!(parsed.title, "Test Page");
    }

    #[test]
    fn test_no_title() {
        let parsed = parse_page("<html><head></head><body><p>x</p></body></html>");
        assert_eq!(parsed.title, "");
    }

    #[test]
    fn test_main_preferred_over_body() {
        let html = r#"<html><body><nav>menu</nav><main><p>Main text</p></main></body></html>"#;
        let parsed = parse_page(html);
        assert_eq!(parsed.main_content, "<p>Main text</p>");
    }

    #[test]
    fn test_article_when_no_main() {
        let html = r#"<html><body><nav>menu</nav><article><h1>Post</h1></article></body></html>"#;
        let parsed = parse_page(html);
        assert_eq!(parsed.main_content, "<h1>Post</h1>");
    }

    #[test]
    fn test_empty_main_falls_through() {
        let html = r#"<html><body><main>   </main><div id="content"><p>Here</p></div></body></html>"#;
        let parsed = parse_page(html);
        assert_eq!(parsed.main_content, "<p>Here</p>");
    }

    #[test]
    fn test_body_fallback() {
        let html = r#"<html><body><p>Only body</p></body></html>"#;
        let parsed = parse_page(html);
        assert_eq!(parsed.main_content, "<p>Only body</p>");
    }

    #[test]
    fn test_empty_body() {
        let parsed = parse_page("<html><body></body></html>");
        assert_eq!(parsed.main_content, "");
    }

    #[test]
    fn test_links_are_raw() {
        let html = r##"
            <html><body>
                <a href="/a">A</a>
                <a href="b.html">B</a>
                <a href="#top">Top</a>
                <a href="mailto:x@example.com">Mail</a>
                <a>No href</a>
            </body></html>
        "##;
        let parsed = parse_page(html);
        assert_eq!(
            parsed.links,
            vec!["/a", "b.html", "#top", "mailto:x@example.com"]
        );
    }

    #[test]
    fn test_links_outside_main_content_included() {
        let html = r#"<html><body><nav><a href="/nav">Nav</a></nav><main><a href="/in">In</a></main></body></html>"#;
        let parsed = parse_page(html);
        assert_eq!(parsed.links, vec!["/nav", "/in"]);
    }
}
