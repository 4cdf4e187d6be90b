//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl, localize and write cycle end-to-end against a temporary directory.

use crawldown::config::Config;
use crawldown::crawler::crawl;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
fn create_test_config(start_url: &str, output_dir: &Path) -> Config {
    let mut config = Config::new(start_url, output_dir.to_string_lossy());
    config.crawler.request_delay = 0;
    config.crawler.request_timeout = 5;
    config.crawler.parallelism = 2;
    config
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>{}</title></head><body><main>{}</main></body></html>",
            title, body
        ),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, route: &str, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(title, body))
        .mount(server)
        .await;
}

/// Sorted names of every file in the output directory
fn written_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read output dir")
        .map(|entry| {
            entry
                .expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .to_string()
        })
        .collect();
    names.sort();
    names
}

fn read_output(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap_or_else(|e| panic!("missing {}: {}", name, e))
}

#[tokio::test]
async fn test_full_crawl_localizes_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<h1>Welcome</h1><p>See <a href="/b">the B page</a> and <a href="https://other.example/x">elsewhere</a>.</p>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/b",
        "Page B",
        r#"<p>Back to <a href="/">home</a> or <a href="/#top">the top</a>.</p>"#,
    )
    .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&format!("{}/", base_url), temp_dir.path());

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(written_files(temp_dir.path()), vec!["b.md", "index.md"]);
    assert_eq!(report.statistics.pages_registered, 2);
    assert_eq!(report.statistics.documents_written, 2);
    assert_eq!(report.write.written.len(), 2);

    let index = read_output(temp_dir.path(), "index.md");
    assert!(index.starts_with("# Home\n\nURL: "), "header missing:\n{}", index);
    assert!(index.contains("---"));
    assert!(index.contains("Welcome"));
    assert!(index.contains("](b.md)"), "link not localized:\n{}", index);
    // Out-of-scope link stays absolute
    assert!(index.contains("](https://other.example/x)"));

    let b = read_output(temp_dir.path(), "b.md");
    assert!(b.starts_with("# Page B\n\n"));
    assert!(b.contains("](index.md)"), "link not localized:\n{}", b);
    assert!(b.contains("](index.md#top)"), "fragment lost:\n{}", b);
}

#[tokio::test]
async fn test_single_page_mode() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/docs/intro",
        "Intro",
        r#"<p>Next: <a href="/docs/next">next</a></p>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/docs/next"))
        .respond_with(html_page("Next", "<p>never</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(&format!("{}/docs/intro", base_url), temp_dir.path());
    config.single_page = true;

    crawl(config).await.expect("Crawl failed");

    assert_eq!(written_files(temp_dir.path()), vec!["docs-intro.md"]);

    // The link target was never crawled, so it is left as written
    let intro = read_output(temp_dir.path(), "docs-intro.md");
    assert!(intro.contains("](/docs/next)"), "unexpected rewrite:\n{}", intro);
}

#[tokio::test]
async fn test_excluded_prefix_is_never_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/public">Public</a> <a href="/private/secret">Secret</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/public"))
        .respond_with(html_page("Public", "<p>open</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(html_page("Secret", "<p>hidden</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(&format!("{}/", base_url), temp_dir.path());
    config.crawler.excluded_paths = vec![format!("{}/private", base_url)];

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(written_files(temp_dir.path()), vec!["index.md", "public.md"]);
    assert_eq!(report.statistics.links_excluded, 1);
}

#[tokio::test]
async fn test_depth_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "Home", r#"<a href="/a">A</a>"#).await;
    mount_page(&mock_server, "/a", "A", r#"<a href="/a/deep">Deeper</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/a/deep"))
        .respond_with(html_page("Deep", "<p>too far</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(&format!("{}/", base_url), temp_dir.path());
    config.crawler.max_depth = 1;

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(written_files(temp_dir.path()), vec!["a.md", "index.md"]);
    assert_eq!(report.statistics.links_beyond_depth, 1);
}

#[tokio::test]
async fn test_robots_txt_disallow_is_respected() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private\n"),
        )
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/open">Open</a> <a href="/private">Private</a>"#,
    )
    .await;
    mount_page(&mock_server, "/open", "Open", "<p>fine</p>").await;

    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(html_page("Private", "<p>no robots</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&format!("{}/", base_url), temp_dir.path());

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(written_files(temp_dir.path()), vec!["index.md", "open.md"]);
    assert_eq!(report.statistics.robots_denied, 1);
}

#[tokio::test]
async fn test_robots_txt_can_be_ignored() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /\n"))
        .expect(0)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/", "Home", r#"<a href="/private">Private</a>"#).await;
    mount_page(&mock_server, "/private", "Private", "<p>allowed anyway</p>").await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(&format!("{}/", base_url), temp_dir.path());
    config.crawler.ignore_robots_txt = true;

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(written_files(temp_dir.path()), vec!["index.md", "private.md"]);
    assert_eq!(report.statistics.robots_denied, 0);
}

#[tokio::test]
async fn test_equivalent_urls_are_crawled_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/list?b=2&a=1">One</a> <a href="/list?a=1&b=2">Two</a> <a href="/list?a=1&b=2#x">Three</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(html_page("List", "<p>items</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&format!("{}/", base_url), temp_dir.path());

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(report.statistics.pages_registered, 2);
    assert_eq!(written_files(temp_dir.path()).len(), 2);

    // Every spelling of the page resolves to the one local file
    let index = read_output(temp_dir.path(), "index.md");
    assert!(!index.contains("](/list"), "link not localized:\n{}", index);
    assert!(index.contains(".md#x)"), "fragment lost:\n{}", index);
}

#[tokio::test]
async fn test_redirect_duplicate_registered_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/old">Old</a> <a href="/new">New</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/new", "New", "<p>moved here</p>").await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&format!("{}/", base_url), temp_dir.path());

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(written_files(temp_dir.path()), vec!["index.md", "new.md"]);
    assert_eq!(report.statistics.pages_registered, 2);
    assert_eq!(report.statistics.duplicates_discarded, 1);
}

#[tokio::test]
async fn test_redirect_to_other_host_is_not_written() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let other_port = url::Url::parse(&other_server.uri())
        .expect("Failed to parse other URL")
        .port()
        .expect("mock server has a port");

    mount_page(&mock_server, "/", "Home", r#"<a href="/go">Go</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/go"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("http://localhost:{}/ext", other_port).as_str()),
        )
        .mount(&mock_server)
        .await;

    mount_page(&other_server, "/ext", "Elsewhere", "<p>not ours</p>").await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&format!("{}/", base_url), temp_dir.path());

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(written_files(temp_dir.path()), vec!["index.md"]);
    assert_eq!(report.statistics.links_out_of_scope, 1);

    let index = read_output(temp_dir.path(), "index.md");
    assert!(index.contains("](/go)"));
}

#[tokio::test]
async fn test_non_html_and_errors_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/report.pdf">PDF</a> <a href="/missing">Gone</a> <a href="/ok">OK</a>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/ok", "OK", "<p>fine</p>").await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&format!("{}/", base_url), temp_dir.path());

    let report = crawl(config).await.expect("Crawl failed");

    assert_eq!(written_files(temp_dir.path()), vec!["index.md", "ok.md"]);
    assert_eq!(report.statistics.fetch_errors, 2);

    // Links to pages that failed keep their original target
    let index = read_output(temp_dir.path(), "index.md");
    assert!(index.contains("](/report.pdf)"));
    assert!(index.contains("](/missing)"));
    assert!(index.contains("](ok.md)"));
}

#[tokio::test]
async fn test_unreachable_start_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out");
    let mut config = create_test_config("http://127.0.0.1:9/", &output);
    config.crawler.request_timeout = 1;

    let report = crawl(config).await.expect("Crawl should complete");

    assert!(output.is_dir(), "output directory is created up front");
    assert!(written_files(&output).is_empty());
    assert_eq!(report.statistics.fetch_errors, 1);
}

#[tokio::test]
async fn test_missing_output_dir_is_fatal() {
    let mut config = Config::new("https://example.com/", "unused");
    config.output_dir = None;

    assert!(crawl(config).await.is_err());
}
