//! Integration tests for the crawler
//!
//! These tests use wiremock to serve listing pages and test the full
//! crawl-then-export cycle end-to-end.

use listing_harvest::config::{
    CacheConfig, Config, CrawlConfig, FetcherConfig, LayoutKind, OutputConfig, SeedEntry,
};
use listing_harvest::crawler::build_driver;
use listing_harvest::output::{sink_from_config, ExportSink};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted in `dir` for the given seeds
fn create_test_config(dir: &TempDir, detail_base: &str, seeds: Vec<String>, pages: u32) -> Config {
    Config {
        fetcher: FetcherConfig {
            max_retries: 0,
            rate_limit_delay_secs: 0,
            user_agent: "listing-harvest-test/1.0".to_string(),
        },
        cache: CacheConfig {
            directory: dir.path().join(".cache").display().to_string(),
            ignore_cache: false,
        },
        crawl: CrawlConfig {
            layout: LayoutKind::Sale,
            pages_per_seed: pages,
            page_param: "pagina".to_string(),
            detail_base_url: detail_base.to_string(),
        },
        output: OutputConfig {
            records_path: dir.path().join("final.csv").display().to_string(),
            error_pages_path: dir.path().join("error_pages.txt").display().to_string(),
        },
        seeds: vec![SeedEntry { year: 2019, urls: seeds }],
    }
}

fn sale_card(title: &str, price: &str, href: &str) -> String {
    format!(
        r#"<div class="property-card__container">
          <div class="property-card__carousel">
            <div class="carousel__item-wrapper"><img alt="{}"></div>
          </div>
          <a class="property-card__main-link" href="{}">
            <span class="property-card__address">Rua Teste, 1</span>
          </a>
          <ul class="property-card__details">
            <li class="property-card__detail-item"><span class="js-property-card-value">90</span></li>
            <li class="property-card__detail-item"><span class="js-property-card-value">2</span></li>
          </ul>
          <div class="property-card__price">R$ {}</div>
        </div>"#,
        title, href, price
    )
}

const DETAIL_PAGE: &str = r#"<html><body>
    <ol>
      <li><span class="breadcrumb__item-name">Viva Real</span></li>
      <li><span class="breadcrumb__item-name">Venda</span></li>
      <li><span class="breadcrumb__item-name">SP</span></li>
      <li><span class="breadcrumb__item-name">São Paulo</span></li>
      <li><span class="breadcrumb__item-name">Zona Norte</span></li>
      <li><span class="breadcrumb__item-name">Santana</span></li>
    </ol>
    <span class="price__list-value condominium">R$ 450</span>
    <ul class="amenities__list"><li>Piscina</li></ul>
</body></html>"#;

#[tokio::test]
async fn test_crawl_and_export_with_failed_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Page 2 must be mounted before page 1, whose matcher also accepts it
    Mock::given(method("GET"))
        .and(path("/listings"))
        .and(query_param("pagina", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body>{}</body></html>",
            sale_card("A", "100", "/imovel/a/")
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/imovel/a/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let seed = format!("{}/listings", base_url);
    let config = create_test_config(&dir, &base_url, vec![seed.clone()], 2);

    let driver = build_driver(&config, false).expect("Failed to build driver");
    let outcome = driver
        .run(config.seeds_for_year(2019).expect("Seeds missing"))
        .await;

    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.get("link"), Some(seed.as_str()));
    assert_eq!(record.get("title"), Some("A"));
    assert_eq!(record.get("price"), Some("100"));
    assert_eq!(record.get("area"), Some("90"));
    assert_eq!(record.get("bathrooms"), None);
    assert_eq!(record.get("condo"), Some("450"));
    assert_eq!(record.get("zone"), Some("Zona Norte"));
    assert_eq!(record.get("district"), Some("Santana"));
    assert_eq!(outcome.error_pages.page_indices(), vec![2]);

    sink_from_config(&config.output)
        .export(&outcome)
        .expect("Export failed");

    let csv = std::fs::read_to_string(&config.output.records_path).expect("CSV missing");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("link,title,address,area,rooms,bathrooms,garage,price,condo,suite,zone,district,characteristics,createdAt")
    );
    assert!(lines
        .next()
        .expect("Record row missing")
        .starts_with(&format!("{},A,\"Rua Teste, 1\",90,2,,,100,450,,Zona Norte,Santana,Piscina,", seed)));
    assert_eq!(lines.next(), None);

    let error_pages =
        std::fs::read_to_string(&config.output.error_pages_path).expect("Ledger missing");
    assert_eq!(error_pages, "2");
}

#[tokio::test]
async fn test_unavailable_detail_page_gives_blank_fields() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body>{}{}</body></html>",
            sale_card("A", "100", "/imovel/a/"),
            sale_card("B", "200", "/imovel/b/")
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/imovel/a/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL_PAGE))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/imovel/b/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&dir, &base_url, vec![format!("{}/listings", base_url)], 1);

    let outcome = build_driver(&config, false)
        .expect("Failed to build driver")
        .run(config.seeds_for_year(2019).expect("Seeds missing"))
        .await;

    assert!(outcome.error_pages.is_empty());
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].get("zone"), Some("Zona Norte"));
    assert_eq!(outcome.records[1].get("title"), Some("B"));
    for field in ["condo", "suite", "zone", "district", "characteristics"] {
        assert!(outcome.records[1].contains(field));
        assert_eq!(outcome.records[1].get(field), None);
    }
}

#[tokio::test]
async fn test_rerun_served_from_cache() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body>{}</body></html>",
            sale_card("A", "100", "/imovel/a/")
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/imovel/a/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&dir, &base_url, vec![format!("{}/listings", base_url)], 1);
    let seeds = config.seeds_for_year(2019).expect("Seeds missing");

    let first = build_driver(&config, false)
        .expect("Failed to build driver")
        .run(seeds)
        .await;
    let second = build_driver(&config, false)
        .expect("Failed to build driver")
        .run(seeds)
        .await;

    assert_eq!(first.records.len(), 1);
    assert_eq!(second.records.len(), 1);
    assert_eq!(second.records[0].get("zone"), Some("Zona Norte"));

    let cached_files = std::fs::read_dir(dir.path().join(".cache"))
        .expect("Cache directory missing")
        .count();
    assert_eq!(cached_files, 2);
}
