//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_corpus::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use site_corpus::crawler::{crawl_site, Crawler};
use site_corpus::output::{write_outputs, CORPUS_HEADERS};
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates crawler settings for a mock server seed with no politeness delay
fn test_settings(seed: &str, page_budget: usize) -> CrawlerConfig {
    let mut settings = CrawlerConfig::with_seed(seed);
    settings.page_budget = page_budget;
    settings.request_delay_ms = 0;
    settings.request_timeout_secs = 1;
    settings
}

fn test_crawler(settings: CrawlerConfig) -> Crawler {
    Crawler::new(settings, &UserAgentConfig::default()).expect("Failed to create crawler")
}

/// Builds a page whose visible text is `word` repeated past the admission threshold
fn content_page(word: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!(
        "<html><body><p>{}</p>{}</body></html>",
        format!("{} ", word).repeat(120),
        anchors
    )
}

async fn mount_html(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

async fn mount_never_requested(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>x</p>", "text/html"))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_budget_limits_breadth_first_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        content_page("home", &["/a", "/b", "https://other.test/x"]),
    )
    .await;
    mount_html(&server, "/a", content_page("alpha", &["/c"])).await;
    mount_html(&server, "/b", content_page("bravo", &[])).await;
    mount_never_requested(&server, "/c").await;

    let seed = format!("{}/", base);
    let output = test_crawler(test_settings(&seed, 3))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(
        output.visited,
        vec![seed.clone(), format!("{}/a", base), format!("{}/b", base)]
    );
    assert_eq!(output.frontier_remaining, vec![format!("{}/c", base)]);
    assert_eq!(output.corpus().len(), 3);
    assert_eq!(output.context.len(), 3);
    assert!(output.context_for(&format!("{}/a", base)).is_some());
    assert!(!output
        .visited
        .iter()
        .any(|url| url.starts_with("https://other.test")));
}

#[tokio::test]
async fn test_error_status_is_visited_but_not_stored() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", content_page("home", &["/broken", "/after"])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(500).set_body_raw(content_page("oops", &["/hidden"]), "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_html(&server, "/after", content_page("after", &[])).await;
    mount_never_requested(&server, "/hidden").await;

    let seed = format!("{}/", base);
    let output = test_crawler(test_settings(&seed, 10))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.visited.len(), 3);
    assert!(output.visited.contains(&format!("{}/broken", base)));
    assert_eq!(output.corpus().len(), 2);
    assert!(output.context_for(&format!("{}/broken", base)).is_none());
    assert_eq!(output.stats.http_errors.get(&500), Some(&1));
}

#[tokio::test]
async fn test_duplicate_content_is_stored_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", content_page("home", &["/one", "/two"])).await;
    let twin = content_page("twin", &["/three"]);
    mount_html(&server, "/one", twin.clone()).await;
    mount_html(&server, "/two", twin).await;
    mount_html(&server, "/three", content_page("three", &[])).await;

    let seed = format!("{}/", base);
    let output = test_crawler(test_settings(&seed, 10))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.visited.len(), 4);
    assert_eq!(output.corpus().len(), 3);
    assert!(output.context_for(&format!("{}/one", base)).is_some());
    assert!(output.context_for(&format!("{}/two", base)).is_none());
    assert_eq!(output.stats.duplicates, 1);

    let twin_text = output.context_for(&format!("{}/one", base)).unwrap();
    assert_eq!(
        output.corpus().iter().filter(|t| *t == twin_text).count(),
        1
    );
}

#[tokio::test]
async fn test_min_content_length_is_strict() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/exact",
        format!("<html><body><p>{}</p></body></html>", "a".repeat(500)),
    )
    .await;
    mount_html(
        &server,
        "/over",
        format!("<html><body><p>{}</p></body></html>", "b".repeat(501)),
    )
    .await;

    let exact = format!("{}/exact", base);
    let output = test_crawler(test_settings(&exact, 1))
        .crawl(&exact)
        .await
        .expect("Crawl failed");
    assert_eq!(output.visited, vec![exact.clone()]);
    assert!(output.is_empty());
    assert_eq!(output.stats.too_short, 1);

    let over = format!("{}/over", base);
    let output = test_crawler(test_settings(&over, 1))
        .crawl(&over)
        .await
        .expect("Crawl failed");
    assert_eq!(output.corpus(), &["b".repeat(501)]);
}

#[tokio::test]
async fn test_boilerplate_is_stripped() {
    let server = MockServer::start().await;
    let base = server.uri();

    let html = format!(
        r#"<html><head><style>body {{ color: red }}</style><script>var tracker = 1;</script></head>
        <body>
            <header>Site Header</header>
            <nav><a href="/menu">Menu Entry</a></nav>
            <main><p>{}</p><a href="/article">Read more</a></main>
            <footer>Copyright Footer</footer>
        </body></html>"#,
        "story ".repeat(120)
    );
    mount_html(&server, "/", html).await;
    mount_html(&server, "/article", content_page("article", &[])).await;
    mount_never_requested(&server, "/menu").await;

    let seed = format!("{}/", base);
    let output = test_crawler(test_settings(&seed, 10))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    let text = output.context_for(&seed).expect("Seed not admitted");
    assert!(text.starts_with("story story"));
    assert!(text.ends_with("Read more"));
    for hidden in ["Site Header", "Menu Entry", "Copyright Footer", "tracker", "color"] {
        assert!(!text.contains(hidden), "{} leaked into the corpus", hidden);
    }
    assert!(!text.contains("  "));
    assert_eq!(output.visited.len(), 2);
}

#[tokio::test]
async fn test_boilerplate_links_followed_when_enabled() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        format!(
            r#"<html><body><nav><a href="/menu">Menu</a></nav><p>{}</p></body></html>"#,
            "home ".repeat(120)
        ),
    )
    .await;
    mount_html(&server, "/menu", content_page("menu", &[])).await;

    let seed = format!("{}/", base);
    let mut settings = test_settings(&seed, 10);
    settings.follow_boilerplate_links = true;
    let output = test_crawler(settings)
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.visited, vec![seed, format!("{}/menu", base)]);
}

#[tokio::test]
async fn test_assets_are_never_requested() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        content_page("home", &["/logo.png", "/photo.JPG", "/page"]),
    )
    .await;
    mount_never_requested(&server, "/logo.png").await;
    mount_never_requested(&server, "/photo.JPG").await;
    mount_html(&server, "/page", content_page("page", &[])).await;

    let seed = format!("{}/", base);
    let output = test_crawler(test_settings(&seed, 2))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.visited, vec![seed, format!("{}/page", base)]);
    assert_eq!(output.stats.assets_skipped, 2);
    assert_eq!(output.stats.requests, 2);
}

#[tokio::test]
async fn test_non_html_is_visited_without_following_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", content_page("home", &["/data"])).await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(content_page("json", &["/inner"]), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_never_requested(&server, "/inner").await;

    let seed = format!("{}/", base);
    let output = test_crawler(test_settings(&seed, 10))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.visited, vec![seed, format!("{}/data", base)]);
    assert_eq!(output.corpus().len(), 1);
    assert_eq!(output.stats.non_html, 1);
}

#[tokio::test]
async fn test_transport_failure_is_not_visited_or_retried() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", content_page("home", &["/slow", "/fast"])).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(content_page("slow", &[]), "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_html(&server, "/fast", content_page("fast", &[])).await;

    let seed = format!("{}/", base);
    let output = test_crawler(test_settings(&seed, 10))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.visited, vec![seed, format!("{}/fast", base)]);
    assert_eq!(output.stats.failures, 1);
    assert!(output.frontier_remaining.is_empty());
}

#[tokio::test]
async fn test_transport_failure_retried_when_configured() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(content_page("slow", &[]), "text/html")
                .set_delay(Duration::from_secs(3)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let seed = format!("{}/slow", base);
    let mut settings = test_settings(&seed, 10);
    settings.retry_attempts = 1;
    let output = test_crawler(settings)
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert!(output.visited.is_empty());
    assert_eq!(output.stats.failures, 1);
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_output() {
    // Bind then release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("Failed to reserve port")
        .port();

    let seed = format!("http://127.0.0.1:{}/", port);
    let output = test_crawler(test_settings(&seed, 10))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert!(output.visited.is_empty());
    assert!(output.is_empty());
    assert!(output.excerpt(100).is_empty());
    assert_eq!(output.stats.failures, 1);
}

#[tokio::test]
async fn test_scope_is_exact_host_and_port() {
    let server = MockServer::start().await;
    let base = server.uri();
    let port = url::Url::parse(&base)
        .expect("Failed to parse base URL")
        .port()
        .expect("Mock server URI has a port");

    // Same server under another host name is a different site
    let alias = format!("http://localhost:{}/alias", port);
    let other_port = format!("http://127.0.0.1:{}/elsewhere", port.wrapping_add(1));

    mount_html(
        &server,
        "/",
        content_page("home", &[alias.as_str(), other_port.as_str(), "/inside"]),
    )
    .await;
    mount_never_requested(&server, "/alias").await;
    mount_html(&server, "/inside", content_page("inside", &[])).await;

    let seed = format!("{}/", base);
    let output = test_crawler(test_settings(&seed, 10))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.domain, format!("127.0.0.1:{}", port));
    assert_eq!(output.visited, vec![seed, format!("{}/inside", base)]);
}

#[tokio::test]
async fn test_fragments_collapse_to_one_request() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(
        &server,
        "/",
        content_page("home", &["/a#top", "/a#bottom", "#local", "/a"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(content_page("alpha", &["/#top"]), "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let output = test_crawler(test_settings(&seed, 10))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.visited, vec![seed, format!("{}/a", base)]);
}

#[tokio::test]
async fn test_links_resolve_against_redirect_target() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/"))
        .mount(&server)
        .await;
    mount_html(&server, "/new/", content_page("moved", &["child"])).await;
    mount_html(&server, "/new/child", content_page("child", &[])).await;

    let seed = format!("{}/old", base);
    let output = test_crawler(test_settings(&seed, 10))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.visited, vec![seed.clone(), format!("{}/new/child", base)]);
    assert!(output.context_for(&seed).is_some());
}

#[tokio::test]
async fn test_seed_with_path_crawls_whole_host() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/docs/start", content_page("start", &["/pricing"])).await;
    mount_html(&server, "/pricing", content_page("pricing", &[])).await;

    let seed = format!("{}/docs/start", base);
    let output = test_crawler(test_settings(&seed, 10))
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.visited, vec![seed, format!("{}/pricing", base)]);
}

#[tokio::test]
async fn test_politeness_delay_between_requests() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", content_page("home", &["/next"])).await;
    mount_html(&server, "/next", content_page("next", &[])).await;

    let seed = format!("{}/", base);
    let mut settings = test_settings(&seed, 10);
    settings.request_delay_ms = 200;

    let start = Instant::now();
    let output = test_crawler(settings)
        .crawl(&seed)
        .await
        .expect("Crawl failed");

    assert_eq!(output.visited.len(), 2);
    assert!(start.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_repeated_crawls_share_no_state() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_html(&server, "/", content_page("home", &[])).await;

    let seed = format!("{}/", base);
    let crawler = test_crawler(test_settings(&seed, 10));
    let first = crawler.crawl(&seed).await.expect("Crawl failed");
    let second = crawler.crawl(&seed).await.expect("Crawl failed");

    assert_eq!(first.corpus(), second.corpus());
    assert_eq!(second.visited, vec![seed]);
    assert_eq!(second.stats.duplicates, 0);
}

#[tokio::test]
async fn test_crawl_site_from_config_writes_outputs() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "CorpusTestBot/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(content_page("home", &["/about"]), "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .and(header("user-agent", "CorpusTestBot/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(content_page("about", &[]), "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let corpus_path = dir.path().join("corpus.csv");
    let summary_path = dir.path().join("crawl.md");

    let seed = format!("{}/", base);
    let config = Config {
        crawler: test_settings(&seed, 10),
        user_agent: UserAgentConfig {
            value: "CorpusTestBot/1.0".to_string(),
        },
        output: OutputConfig {
            corpus_path: Some(corpus_path.to_string_lossy().into_owned()),
            summary_path: Some(summary_path.to_string_lossy().into_owned()),
            excerpt_chars: 20,
        },
    };

    let output = crawl_site(&config).await.expect("Crawl failed");
    assert_eq!(output.corpus().len(), 2);
    assert_eq!(output.excerpt(config.output.excerpt_chars).chars().count(), 20);

    let written = write_outputs(&output, &config.output).expect("Failed to write outputs");
    assert_eq!(written, 2);

    let mut reader = csv::Reader::from_path(&corpus_path).expect("Failed to open corpus CSV");
    assert_eq!(
        reader.headers().expect("Missing CSV header"),
        &csv::StringRecord::from(CORPUS_HEADERS.to_vec())
    );
    let urls: Vec<String> = reader
        .records()
        .map(|record| record.expect("Bad CSV row")[0].to_string())
        .collect();
    assert_eq!(urls, vec![seed, format!("{}/about", base)]);

    let summary = std::fs::read_to_string(&summary_path).expect("Failed to read summary");
    assert!(summary.contains("- **Corpus Entries**: 2"));
}
