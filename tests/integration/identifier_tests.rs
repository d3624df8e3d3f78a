//! Integration tests for record lookups against an on-disk index

mod common;

use common::{catalog_with_index, write_index};
use efta_locator::index::IndexError;
use efta_locator::{LocatorError, NameQuery};
use tempfile::tempdir;

#[tokio::test]
async fn test_exact_record_is_indexed() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("index.db");
    write_index(&db_path, &[(78921, 9, 12, 3), (78922, 9, 12, 4), (78923, 9, 12, 5)]);

    let catalog = catalog_with_index(&db_path);
    let location = catalog
        .find_file("EFTA00078922", None)
        .await
        .expect("Lookup failed");

    assert!(location.indexed);
    assert_eq!(location.set_id, 9);
    assert_eq!(location.page, 12);
    assert_eq!(location.item, Some(4));
    assert_eq!(location.name, "EFTA00078922.pdf");
    assert_eq!(location.file_id_before.as_deref(), Some("00078922"));
    assert_eq!(location.file_id_after.as_deref(), Some("00078922"));
}

#[tokio::test]
async fn test_missing_record_uses_lower_neighbour() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("index.db");
    write_index(&db_path, &[(100, 1, 3, 7), (200, 1, 4, 0)]);

    let catalog = catalog_with_index(&db_path);
    let location = catalog.find_file("EFTA00000150", None).await.unwrap();

    assert!(!location.indexed);
    assert_eq!(location.file_id_before.as_deref(), Some("00000100"));
    assert_eq!(location.file_id_after.as_deref(), Some("00000200"));
    assert_eq!((location.set_id, location.page, location.item), (1, 3, Some(7)));
    assert_eq!(location.name, "EFTA00000150");
    assert_eq!(
        location.url,
        "https://www.justice.gov/epstein/files/DataSet%201/EFTA00000150.pdf"
    );
}

#[tokio::test]
async fn test_set_scope_restricts_neighbours() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("index.db");
    write_index(&db_path, &[(100, 1, 3, 7), (140, 2, 0, 0), (300, 2, 1, 4)]);

    let catalog = catalog_with_index(&db_path);

    let scoped = catalog.find_file("EFTA00000150", Some(2)).await.unwrap();
    assert_eq!(scoped.set_id, 2);
    assert_eq!(scoped.file_id_before.as_deref(), Some("00000140"));
    assert_eq!(scoped.file_id_after.as_deref(), Some("00000300"));

    let result = catalog.find_file("EFTA00000150", Some(7)).await;
    match result {
        Err(LocatorError::NotFound { key, partition }) => {
            assert_eq!(key, "EFTA00000150");
            assert_eq!(partition, Some(7));
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_name_fails_before_index_open() {
    let temp_dir = tempdir().unwrap();
    // No database is written; validation must fail first
    let catalog = catalog_with_index(&temp_dir.path().join("absent.db"));

    let result = catalog.find_file("EFTA-0078922", None).await;
    assert!(matches!(result, Err(LocatorError::Validation { .. })));
}

#[tokio::test]
async fn test_missing_index_file() {
    let temp_dir = tempdir().unwrap();
    let catalog = catalog_with_index(&temp_dir.path().join("absent.db"));

    let result = catalog.find_file("EFTA00078922", None).await;
    assert!(matches!(
        result,
        Err(LocatorError::Index(IndexError::Missing(_)))
    ));
    assert!(!temp_dir.path().join("absent.db").exists());
}

#[tokio::test]
async fn test_search_index_window() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("index.db");
    let rows: Vec<_> = (1..=12).map(|key| (key, 1, 0, key as u32)).collect();
    write_index(&db_path, &rows);

    let catalog = catalog_with_index(&db_path);
    let result = catalog
        .search_index(&NameQuery::substring("EFTA000000").unwrap(), 4, 3)
        .await
        .unwrap();

    assert_eq!(result.amount, 12);
    let ids: Vec<_> = result.matches.iter().map(|m| m.file_id.as_str()).collect();
    assert_eq!(ids, vec!["00000005", "00000006", "00000007"]);
    assert_eq!(result.matches[0].set_id, Some(1));
    assert_eq!(result.matches[0].highlights, vec!["EFTA00000005.pdf".to_string()]);
}

#[tokio::test]
async fn test_search_index_no_matches() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("index.db");
    write_index(&db_path, &[(1, 1, 0, 0)]);

    let catalog = catalog_with_index(&db_path);
    let result = catalog
        .search_index(&NameQuery::substring("memo_%").unwrap(), 0, 10)
        .await
        .unwrap();

    assert_eq!(result.amount, 0);
    assert!(result.matches.is_empty());
}

#[tokio::test]
async fn test_search_index_pattern() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("index.db");
    write_index(&db_path, &[(7, 1, 0, 0), (17, 2, 0, 1), (27, 2, 1, 0), (30, 3, 0, 0)]);

    let catalog = catalog_with_index(&db_path);
    let query = NameQuery::pattern(r"^efta000000\d7\.pdf$").unwrap();
    let result = catalog.search_index(&query, 1, 10).await.unwrap();

    assert_eq!(result.amount, 3);
    let ids: Vec<_> = result.matches.iter().map(|m| m.file_id.as_str()).collect();
    assert_eq!(ids, vec!["00000017", "00000027"]);
}

#[tokio::test]
async fn test_search_index_rejects_blank_query() {
    let temp_dir = tempdir().unwrap();
    let db_path = temp_dir.path().join("index.db");
    write_index(&db_path, &[(1, 1, 0, 0)]);

    assert!(matches!(
        NameQuery::substring("   "),
        Err(LocatorError::Validation { .. })
    ));

    let catalog = catalog_with_index(&db_path);
    let blank = NameQuery::Substring(" ".to_string());
    let result = catalog.search_index(&blank, 0, 10).await;
    assert!(matches!(result, Err(LocatorError::Validation { .. })));
}
