//! Integration tests for offset/limit windows over the remote search API

mod common;

use common::{catalog_for, mount_search_page};
use efta_locator::{LocatorError, SearchQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_window_spans_remote_pages() {
    let mock_server = MockServer::start().await;
    mount_search_page(&mock_server, "Epstein", 1, 37, 1).await;
    mount_search_page(&mock_server, "Epstein", 2, 37, 1).await;
    mount_search_page(&mock_server, "Epstein", 3, 37, 1).await;
    mount_search_page(&mock_server, "Epstein", 4, 37, 0).await;

    let catalog = catalog_for(&mock_server);
    let result = catalog
        .search_files(&SearchQuery::new(["Epstein"]), 3, 22)
        .await
        .expect("Search failed");

    assert_eq!(result.amount, 37);
    assert_eq!(result.matches.len(), 22);

    let first = &result.matches[0];
    assert_eq!(first.file_id, "00000003");
    assert_eq!(first.set_id, Some(1));
    assert_eq!(first.highlights, vec!["match <em>3</em>".to_string()]);
    assert_eq!(result.matches[21].file_id, "00000024");
}

#[tokio::test]
async fn test_offset_starts_on_later_page() {
    let mock_server = MockServer::start().await;
    mount_search_page(&mock_server, "Epstein", 1, 37, 0).await;
    mount_search_page(&mock_server, "Epstein", 2, 37, 0).await;
    mount_search_page(&mock_server, "Epstein", 3, 37, 1).await;
    mount_search_page(&mock_server, "Epstein", 4, 37, 1).await;

    let catalog = catalog_for(&mock_server);
    let result = catalog
        .search_files(&SearchQuery::new(["Epstein"]), 25, 10)
        .await
        .unwrap();

    let ids: Vec<_> = result.matches.iter().map(|m| m.file_id.as_str()).collect();
    assert_eq!(ids.first(), Some(&"00000025"));
    assert_eq!(ids.last(), Some(&"00000034"));
    assert_eq!(result.amount, 37);
}

#[tokio::test]
async fn test_fewer_hits_than_limit() {
    let mock_server = MockServer::start().await;
    mount_search_page(&mock_server, "Epstein", 1, 14, 1).await;
    mount_search_page(&mock_server, "Epstein", 2, 14, 1).await;
    // Page 3 is past the end and comes back empty
    mount_search_page(&mock_server, "Epstein", 3, 14, 1).await;
    mount_search_page(&mock_server, "Epstein", 4, 14, 0).await;

    let catalog = catalog_for(&mock_server);
    let result = catalog
        .search_files(&SearchQuery::new(["Epstein"]), 0, 50)
        .await
        .unwrap();

    assert_eq!(result.amount, 14);
    assert_eq!(result.matches.len(), 14);
}

#[tokio::test]
async fn test_offset_past_total_is_empty() {
    let mock_server = MockServer::start().await;
    mount_search_page(&mock_server, "Epstein", 11, 14, 1).await;

    let catalog = catalog_for(&mock_server);
    let result = catalog
        .search_files(&SearchQuery::new(["Epstein"]), 100, 10)
        .await
        .unwrap();

    assert_eq!(result.amount, 14);
    assert!(result.matches.is_empty());
}

#[tokio::test]
async fn test_failed_page_aborts_whole_window() {
    let mock_server = MockServer::start().await;
    mount_search_page(&mock_server, "Epstein", 1, 37, 1).await;
    Mock::given(method("GET"))
        .and(path("/multimedia-search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let catalog = catalog_for(&mock_server);
    let result = catalog
        .search_files(&SearchQuery::new(["Epstein"]), 0, 20)
        .await;

    assert!(matches!(
        result,
        Err(LocatorError::Transport { status: 429, .. })
    ));
}

#[tokio::test]
async fn test_malformed_body_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/multimedia-search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let catalog = catalog_for(&mock_server);
    let result = catalog
        .search_files(&SearchQuery::new(["Epstein"]), 0, 10)
        .await;

    assert!(matches!(result, Err(LocatorError::SearchDecode { .. })));
}

#[tokio::test]
async fn test_multiple_keys_joined() {
    let mock_server = MockServer::start().await;
    mount_search_page(&mock_server, "flight log", 1, 3, 1).await;
    mount_search_page(&mock_server, "flight log", 2, 3, 1).await;

    let catalog = catalog_for(&mock_server);
    let result = catalog
        .search_files(&SearchQuery::new(["flight", " log "]), 0, 10)
        .await
        .unwrap();

    assert_eq!(result.matches.len(), 3);
}

#[tokio::test]
async fn test_filter_sent_on_every_page() {
    let mock_server = MockServer::start().await;
    for page in 1..=2u64 {
        Mock::given(method("GET"))
            .and(path("/multimedia-search"))
            .and(query_param("keys", "Epstein"))
            .and(query_param("filter", "DataSet 2"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_string(common::search_body(
                15,
                (page - 1) * 10,
                (page * 10).min(15),
            )))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let catalog = catalog_for(&mock_server);
    let query = SearchQuery::new(["Epstein"]).with_filter("DataSet 2");
    let result = catalog.search_files(&query, 5, 10).await.unwrap();

    assert_eq!(result.amount, 15);
    assert_eq!(result.matches.len(), 10);
    assert_eq!(result.matches[0].file_id, "00000005");
}
