//! Fetcher tests against a mocked proxy endpoint.
//!
//! Covers the display-state lifecycle and the last-writer-wins guarantee
//! under out-of-order completion.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scholar_proxy::{PublicationFetcher, PublicationFilters};

fn page_body(titles_and_years: &[(&str, &str)], start: u32, has_next: bool) -> serde_json::Value {
    let publications: Vec<serde_json::Value> = titles_and_years
        .iter()
        .map(|(title, year)| {
            json!({
                "title": title,
                "authors": "A Researcher",
                "year": year,
                "venue": "Test Journal",
                "citations": 1,
                "description": "Test Journal - 1 citations"
            })
        })
        .collect();

    json!({
        "publications": publications,
        "start": start,
        "limit": 10,
        "hasNext": has_next,
        "hasPrev": start > 0,
        "totalResults": publications.len()
    })
}

fn fetcher_for(mock_server: &MockServer) -> PublicationFetcher {
    PublicationFetcher::new(
        format!("{}/api/publications", mock_server.uri()),
        "SCHOLAR1",
        "test-key",
        10,
    )
}

#[tokio::test]
async fn test_load_page_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/publications"))
        .and(query_param("scholarId", "SCHOLAR1"))
        .and(query_param("serpApiKey", "test-key"))
        .and(query_param("start", "0"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            &[("Older", "2021"), ("Newer", "2024")],
            0,
            true,
        )))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    fetcher.load_page(0, &PublicationFilters::default()).await;

    let state = fetcher.state().await;
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.publications.len(), 2);
    // Fetcher applies the year-descending sort to each page.
    assert_eq!(state.publications[0].title, "Newer");
    assert!(state.has_next);
    assert!(!state.has_prev);
    assert_eq!(state.total_results, 2);
}

#[tokio::test]
async fn test_load_page_applies_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/publications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
            &[("Open-source EEG headphones", "2021"), ("Thermal comfort study", "2023")],
            0,
            false,
        )))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let filters = PublicationFilters::default().with_search_term("EEG");
    fetcher.load_page(0, &filters).await;

    let state = fetcher.state().await;
    assert_eq!(state.publications.len(), 1);
    assert_eq!(state.publications[0].title, "Open-source EEG headphones");
}

#[tokio::test]
async fn test_failure_keeps_prior_publications() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/publications"))
        .and(query_param("start", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_body(&[("Kept", "2024")], 0, true)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/publications"))
        .and(query_param("start", "10"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({
            "error": "SerpAPI error: 502",
            "details": "bad gateway"
        })))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let filters = PublicationFilters::default();

    fetcher.load_page(0, &filters).await;
    assert_eq!(fetcher.state().await.publications.len(), 1);

    fetcher.load_page(10, &filters).await;

    let state = fetcher.state().await;
    assert!(!state.loading);
    // Error message comes from the proxy's error field, and the previous
    // page keeps rendering.
    assert_eq!(state.error.as_deref(), Some("SerpAPI error: 502"));
    assert_eq!(state.publications.len(), 1);
    assert_eq!(state.publications[0].title, "Kept");
}

#[tokio::test]
async fn test_error_field_in_success_body_is_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/publications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "No articles found in SerpAPI response"
        })))
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    fetcher.load_page(0, &PublicationFilters::default()).await;

    let state = fetcher.state().await;
    assert_eq!(state.error.as_deref(), Some("No articles found in SerpAPI response"));
    assert!(state.publications.is_empty());
}

#[tokio::test]
async fn test_unreachable_proxy_sets_error() {
    let fetcher = PublicationFetcher::new(
        "http://127.0.0.1:1/api/publications",
        "SCHOLAR1",
        "test-key",
        10,
    );
    fetcher.load_page(0, &PublicationFilters::default()).await;

    let state = fetcher.state().await;
    assert!(!state.loading);
    assert!(state.error.as_deref().unwrap().contains("Failed to reach publications API"));
}

#[tokio::test]
async fn test_slow_early_request_cannot_clobber_later_one() {
    let mock_server = MockServer::start().await;

    // First page answers slowly, second page answers immediately.
    Mock::given(method("GET"))
        .and(path("/api/publications"))
        .and(query_param("start", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[("Stale page", "2020")], 0, true))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/publications"))
        .and(query_param("start", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[("Fresh page", "2024")], 10, false)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = fetcher_for(&mock_server);
    let filters = PublicationFilters::default();

    let slow = {
        let fetcher = fetcher.clone();
        let filters = filters.clone();
        tokio::spawn(async move { fetcher.load_page(0, &filters).await })
    };

    // Let the first request get in flight, then issue the newer one.
    tokio::time::sleep(Duration::from_millis(100)).await;
    fetcher.load_page(10, &filters).await;

    // The slow first request resolves after the second; its result must be
    // discarded.
    slow.await.unwrap();

    let state = fetcher.state().await;
    assert!(!state.loading);
    assert_eq!(state.offset, 10);
    assert_eq!(state.publications.len(), 1);
    assert_eq!(state.publications[0].title, "Fresh page");
    assert!(state.has_prev);
}

#[tokio::test]
async fn test_next_and_prev_offsets() {
    let mock_server = MockServer::start().await;

    for start in ["0", "10", "20"] {
        Mock::given(method("GET"))
            .and(path("/api/publications"))
            .and(query_param("start", start))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(
                &[("Paper", "2024")],
                start.parse().unwrap(),
                true,
            )))
            .mount(&mock_server)
            .await;
    }

    let fetcher = fetcher_for(&mock_server);
    let filters = PublicationFilters::default();

    fetcher.load_page(0, &filters).await;
    fetcher.next_page(&filters).await;
    assert_eq!(fetcher.state().await.offset, 10);

    fetcher.next_page(&filters).await;
    assert_eq!(fetcher.state().await.offset, 20);

    fetcher.prev_page(&filters).await;
    assert_eq!(fetcher.state().await.offset, 10);

    fetcher.prev_page(&filters).await;
    assert_eq!(fetcher.state().await.offset, 0);

    // Stepping back from the first page clamps at zero.
    fetcher.prev_page(&filters).await;
    assert_eq!(fetcher.state().await.offset, 0);
}
