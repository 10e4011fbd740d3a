//! Fetch layer tests using wiremock for the HTTP side

use listing_harvest::cache::{cache_key, CacheStore, FsCacheStore};
use listing_harvest::config::FetcherConfig;
use listing_harvest::fetcher::{
    build_http_client, CachedFetcher, ConstantDelay, PageFetcher, ReqwestTransport, RetryPolicy,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fetcher with the given retry budget and no wait between retries
fn fetcher(max_retries: u32) -> PageFetcher {
    let client = build_http_client(&FetcherConfig::default()).expect("Failed to build client");
    PageFetcher::new(ReqwestTransport::new(client))
        .with_policy(RetryPolicy::new(max_retries, ConstantDelay(Duration::ZERO)))
}

#[tokio::test]
async fn test_fetch_returns_body_unchanged() {
    let mock_server = MockServer::start().await;
    let body = "<html>\n<body>Área útil: 90 m² · R$ 699.753</body>\n</html>\n";

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/listings", mock_server.uri());
    let html = fetcher(3).fetch(&url).await.expect("Fetch failed");

    assert_eq!(html.as_deref(), Some(body));
}

#[tokio::test]
async fn test_rate_limited_twice_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/listings", mock_server.uri());
    let html = fetcher(3).fetch(&url).await.expect("Fetch failed");

    assert_eq!(html.as_deref(), Some("<html>ok</html>"));
}

#[tokio::test]
async fn test_always_rate_limited_gives_up_after_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(429))
        .expect(4)
        .mount(&mock_server)
        .await;

    let url = format!("{}/listings", mock_server.uri());
    let err = fetcher(3).fetch(&url).await.unwrap_err();

    assert_eq!(err.url, url);
    assert!(err.message.contains("429"));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/listings", mock_server.uri());
    assert!(fetcher(3).fetch(&url).await.is_err());
}

#[tokio::test]
async fn test_no_content_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let url = format!("{}/empty", mock_server.uri());
    assert_eq!(fetcher(3).fetch(&url).await.expect("Fetch failed"), None);
}

#[tokio::test]
async fn test_cached_fetch_hits_network_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>cached</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let store = Arc::new(FsCacheStore::new(cache_dir.path().join(".cache")));
    let cached = CachedFetcher::new(fetcher(3), store.clone());

    let url = format!("{}/listings", mock_server.uri());
    let first = cached.fetch(&url).await.expect("First fetch failed");
    let second = cached.fetch(&url).await.expect("Second fetch failed");

    assert_eq!(first.as_deref(), Some("<html>cached</html>"));
    assert_eq!(second, first);
    assert!(store.has(&url).await);

    let file = cache_dir
        .path()
        .join(".cache")
        .join(format!("{}.html", cache_key(&url)));
    assert_eq!(
        std::fs::read_to_string(file).expect("Cache file missing"),
        "<html>cached</html>"
    );
}
