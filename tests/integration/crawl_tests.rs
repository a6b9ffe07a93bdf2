//! Integration tests for the crawler
//!
//! These tests use wiremock to serve listing and detail pages and drive the
//! full crawl loop end-to-end.

use guide_crawler::config::{Config, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT};
use guide_crawler::crawler::{
    parse_listing_page, process_detail_page, process_listing_page, Coordinator, Fetcher,
};
use guide_crawler::config::ExclusionSet;
use guide_crawler::{RatingTier, TerminationReason};
use std::time::{Duration, Instant};
use url::Url;
use wiremock::matchers::{headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Header values as the mock server sees them: split on commas and trimmed
fn header_parts(value: &str) -> Vec<&str> {
    value.split(',').map(str::trim).collect()
}

/// Default config with a near-zero politeness delay and details off
fn fast_config() -> Config {
    let mut config = Config::default();
    config.crawler.politeness_delay_ms = 10; // Very short for testing
    config.crawler.fetch_details = false;
    config.client.timeout_secs = 5;
    config
}

fn card(name: &str, stars: usize, detail_href: &str) -> String {
    let icons = "<img class=\"michelin-award\" src=\"/assets/1star.svg\">".repeat(stars);
    format!(
        r#"<div class="card__menu">
            <div class="card__menu-content">
                <span class="distinction-icon">{icons}</span>
                <h3 class="card__menu-content--title"><a href="{detail_href}">{name}</a></h3>
                <div class="card__menu-footer--score">Nara, Japan</div>
                <div class="card__menu-footer--score">
                    ¥¥
                    ·
                    Japanese
                </div>
            </div>
        </div>"#
    )
}

fn listing(cards: &[String], next_href: Option<&str>) -> String {
    let pagination = match next_href {
        Some(href) => format!(
            r#"<ul class="pagination">
                <li><a href="{href}"><i class="fa fa-angle-right"></i></a></li>
            </ul>"#
        ),
        None => String::new(),
    };
    format!(
        "<html><body><div class=\"row\">{}</div>{}</body></html>",
        cards.join("\n"),
        pagination
    )
}

fn cards(prefix: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| card(&format!("{} {}", prefix, i), i % 4, &format!("/r/{}-{}", prefix, i)))
        .collect()
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn start_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/restaurants", server.uri())).expect("Failed to parse start URL")
}

#[tokio::test]
async fn test_two_page_crawl() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/restaurants",
        listing(&cards("First", 20), Some("/restaurants/page/2")),
    )
    .await;
    mount_page(&server, "/restaurants/page/2", listing(&cards("Second", 5), None)).await;

    let coordinator = Coordinator::new(&fast_config()).expect("Failed to build coordinator");
    let outcome = coordinator.run(start_url(&server)).await.expect("Crawl failed");

    assert_eq!(outcome.records.len(), 25);
    assert_eq!(outcome.reason, TerminationReason::NoNextLink);
    assert!(outcome.is_success());
    assert_eq!(outcome.pages_visited, 2);

    // Page-then-card order
    assert_eq!(outcome.records[0].name, "First 0");
    assert_eq!(outcome.records[19].name, "First 19");
    assert_eq!(outcome.records[20].name, "Second 0");
    assert_eq!(outcome.records[24].name, "Second 4");

    // Fields parsed from the card markup
    let third = &outcome.records[3];
    assert_eq!(third.rating, RatingTier::ThreeStars);
    assert_eq!(third.price_range.as_deref(), Some("¥¥"));
    assert_eq!(third.cuisine.as_deref(), Some("Japanese"));
    assert_eq!(third.city.as_deref(), Some("Nara, Japan"));
    assert_eq!(
        third.detail_url.as_ref().map(Url::as_str),
        Some(format!("{}/r/First-3", server.uri()).as_str())
    );
}

#[tokio::test]
async fn test_start_page_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/restaurants"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(&fast_config()).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.reason, TerminationReason::InitialPageEmpty);
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn test_start_page_without_cards() {
    let server = MockServer::start().await;
    mount_page(&server, "/restaurants", listing(&[], Some("/restaurants/page/2"))).await;

    let coordinator = Coordinator::new(&fast_config()).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.reason, TerminationReason::InitialPageEmpty);
}

#[tokio::test]
async fn test_empty_later_page_is_natural_end() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/restaurants",
        listing(&cards("Only", 3), Some("/restaurants/page/2")),
    )
    .await;
    mount_page(&server, "/restaurants/page/2", listing(&[], None)).await;

    let coordinator = Coordinator::new(&fast_config()).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.reason, TerminationReason::NaturalEnd);
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_failing_later_page_keeps_records() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/restaurants",
        listing(&cards("Only", 2), Some("/restaurants/page/2")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/restaurants/page/2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(&fast_config()).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.reason, TerminationReason::NaturalEnd);
}

#[tokio::test]
async fn test_self_referential_next_link_stops() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/restaurants"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing(&cards("Loop", 4), Some("/restaurants"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(&fast_config()).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.reason, TerminationReason::NoNextLink);
}

#[tokio::test]
async fn test_cycle_between_pages_stops() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/restaurants",
        listing(&cards("A", 2), Some("/restaurants/page/2")),
    )
    .await;
    mount_page(
        &server,
        "/restaurants/page/2",
        listing(&cards("B", 2), Some("/restaurants")),
    )
    .await;

    let coordinator = Coordinator::new(&fast_config()).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.reason, TerminationReason::CycleDetected);
    assert_eq!(outcome.pages_visited, 2);
}

#[tokio::test]
async fn test_page_limit() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/restaurants",
        listing(&cards("A", 2), Some("/restaurants/page/2")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/restaurants/page/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&cards("B", 2), None)))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = fast_config();
    config.crawler.max_pages = Some(1);
    let coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.reason, TerminationReason::PageLimitReached);
}

#[tokio::test]
async fn test_exclusions_and_duplicates() {
    let server = MockServer::start().await;

    let page_one = vec![
        card("Repeated Banner", 0, "/r/banner"),
        card("Akordu", 1, "/r/akordu"),
        card("Wakakusa", 0, "/r/wakakusa"),
    ];
    let page_two = vec![
        card("Repeated Banner", 0, "/r/banner"),
        card("Wakakusa", 0, "/r/wakakusa"),
        card("Tsukumo", 2, "/r/tsukumo"),
    ];
    mount_page(
        &server,
        "/restaurants",
        listing(&page_one, Some("/restaurants/page/2")),
    )
    .await;
    mount_page(&server, "/restaurants/page/2", listing(&page_two, None)).await;

    let mut config = fast_config();
    config.exclusions.names = vec!["Repeated Banner".to_string()];
    let coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Akordu", "Wakakusa", "Tsukumo"]);
    assert_eq!(outcome.excluded_cards, 2);
    assert_eq!(outcome.duplicate_cards, 1);
}

#[tokio::test]
async fn test_duplicates_kept_when_dedupe_disabled() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/restaurants",
        listing(&[card("Twice", 0, "/r/a"), card("Twice", 0, "/r/b")], None),
    )
    .await;

    let mut config = fast_config();
    config.crawler.dedupe_names = false;
    let coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.records.len(), 2);
}

fn detail_page(address: &str, lat: f64, lon: f64) -> String {
    format!(
        r#"<html><body>
            <iframe src="/consent"></iframe>
            <div class="data-sheet__block--text">{address}</div>
            <div class="data-sheet__description">Counter seating only.</div>
            <a data-event="CTA_tel" href="tel:+81 742-00-0000">Call</a>
            <a data-event="CTA_website" href="https://restaurant.example.jp/">Website</a>
            <a class="js-restaurant-book-btn" href="https://book.example.jp/r">Book</a>
            <iframe src="https://maps.example.com/maps?q={lat},{lon}"></iframe>
        </body></html>"#
    )
}

#[tokio::test]
async fn test_detail_enrichment() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/restaurants",
        listing(
            &[
                card("Akordu", 1, "/r/akordu"),
                card("Missing", 0, "/r/missing"),
                card("Wakakusa", 0, "/r/wakakusa"),
            ],
            None,
        ),
    )
    .await;
    mount_page(&server, "/r/akordu", detail_page("1 Park Road", 34.6851, 135.8398)).await;
    Mock::given(method("GET"))
        .and(path("/r/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_page(&server, "/r/wakakusa", detail_page("2 Hill Lane", 34.6, 135.9)).await;

    let mut config = fast_config();
    config.crawler.fetch_details = true;
    let coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.records.len(), 3);

    let akordu = &outcome.records[0];
    assert_eq!(akordu.address.as_deref(), Some("1 Park Road"));
    assert_eq!(akordu.description.as_deref(), Some("Counter seating only."));
    assert_eq!(akordu.telephone.as_deref(), Some("+81 742-00-0000"));
    assert_eq!(
        akordu.website_url.as_deref(),
        Some("https://restaurant.example.jp/")
    );
    assert_eq!(
        akordu.reservation_url.as_deref(),
        Some("https://book.example.jp/r")
    );
    let coordinates = akordu.coordinates.expect("coordinates missing");
    assert_eq!(coordinates.latitude, 34.6851);
    assert_eq!(coordinates.longitude, 135.8398);

    // A failed detail fetch still yields the listing record
    let missing = &outcome.records[1];
    assert_eq!(missing.name, "Missing");
    assert!(!missing.has_details());

    assert_eq!(outcome.records[2].address.as_deref(), Some("2 Hill Lane"));
}

#[tokio::test]
async fn test_concurrent_details_keep_card_order() {
    let server = MockServer::start().await;

    let names = ["Slow", "Medium", "Fast", "Instant"];
    let delays = [150u64, 100, 50, 0];
    let listing_cards: Vec<String> = names
        .iter()
        .map(|name| card(name, 0, &format!("/r/{}", name.to_lowercase())))
        .collect();
    mount_page(&server, "/restaurants", listing(&listing_cards, None)).await;

    for (name, delay) in names.iter().zip(delays) {
        Mock::given(method("GET"))
            .and(path(format!("/r/{}", name.to_lowercase()).as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(detail_page(&format!("{} Street", name), 1.0, 2.0))
                    .set_delay(Duration::from_millis(delay)),
            )
            .mount(&server)
            .await;
    }

    let mut config = fast_config();
    config.crawler.fetch_details = true;
    config.crawler.detail_concurrency = 4;
    let coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    let addresses: Vec<&str> = outcome
        .records
        .iter()
        .map(|r| r.address.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(
        addresses,
        vec!["Slow Street", "Medium Street", "Fast Street", "Instant Street"]
    );
}

#[tokio::test]
async fn test_browser_headers_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/restaurants"))
        .and(headers("user-agent", header_parts(DEFAULT_USER_AGENT)))
        .and(headers("accept-language", header_parts(DEFAULT_ACCEPT_LANGUAGE)))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&cards("H", 1), None)))
        .expect(1)
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(&fast_config()).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    // Without the headers the mock would not match and the page would 404
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.reason, TerminationReason::NoNextLink);
}

#[tokio::test]
async fn test_custom_client_headers_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/restaurants"))
        .and(headers("user-agent", vec!["GuideTest/2.0"]))
        .and(headers("accept-language", vec!["ja-JP"]))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&cards("J", 2), None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = fast_config();
    config.client.user_agent = "GuideTest/2.0".to_string();
    config.client.accept_language = "ja-JP".to_string();
    let coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.records.len(), 2);
}

#[tokio::test]
async fn test_politeness_delay_between_pages() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/restaurants",
        listing(&cards("A", 1), Some("/restaurants/page/2")),
    )
    .await;
    mount_page(&server, "/restaurants/page/2", listing(&cards("B", 1), None)).await;

    let mut config = fast_config();
    config.crawler.politeness_delay_ms = 100;
    let coordinator = Coordinator::new(&config).unwrap();

    let started = Instant::now();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.pages_visited, 2);
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_no_politeness_delay_after_last_page() {
    let server = MockServer::start().await;
    mount_page(&server, "/restaurants", listing(&cards("A", 3), None)).await;

    let mut config = fast_config();
    config.crawler.politeness_delay_ms = 1_000;
    let coordinator = Coordinator::new(&config).unwrap();

    let started = Instant::now();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.reason, TerminationReason::NoNextLink);
    assert!(started.elapsed() < Duration::from_millis(1_000));
}

#[tokio::test]
async fn test_no_politeness_delay_on_cycle() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/restaurants",
        listing(&cards("A", 1), Some("/restaurants#top")),
    )
    .await;

    let mut config = fast_config();
    config.crawler.politeness_delay_ms = 1_000;
    let coordinator = Coordinator::new(&config).unwrap();

    let started = Instant::now();
    let outcome = coordinator.run(start_url(&server)).await.unwrap();

    assert_eq!(outcome.pages_visited, 1);
    assert!(started.elapsed() < Duration::from_millis(1_000));
}

#[tokio::test]
async fn test_listing_processing_is_idempotent() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/restaurants",
        listing(&cards("Same", 6), Some("/restaurants/page/2")),
    )
    .await;

    let fetcher = Fetcher::new(&fast_config().client).unwrap();
    let exclusions = ExclusionSet::new();
    let url = start_url(&server);

    let first = process_listing_page(&fetcher, &url, &exclusions).await;
    let second = process_listing_page(&fetcher, &url, &exclusions).await;

    assert_eq!(first, second);
    assert_eq!(first.cards.len(), 6);

    let body = reqwest::get(url.clone()).await.unwrap().text().await.unwrap();
    assert_eq!(parse_listing_page(&body, &url, &exclusions), first);
}

#[tokio::test]
async fn test_detail_fetch_failure_is_empty() {
    let server = MockServer::start().await;

    let fetcher = Fetcher::new(&fast_config().client).unwrap();
    let url = Url::parse(&format!("{}/r/nowhere", server.uri())).unwrap();
    let detail = process_detail_page(&fetcher, &url).await;

    assert!(detail.is_empty());
}
