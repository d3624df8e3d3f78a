//! Shared fixtures for the integration tests
#![allow(dead_code)]

use efta_locator::index::initialize_schema;
use efta_locator::{Catalog, Config};
use rusqlite::{params, Connection};
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a catalog pointed at the mock server
pub fn catalog_for(server: &MockServer) -> Catalog {
    let mut config = Config::default();
    config.remote.base_url = server.uri();
    config.remote.file_url_prefix = format!("{}/epstein/files/", server.uri());
    config.remote.search_url = format!("{}/multimedia-search", server.uri());
    Catalog::new(config)
}

/// Creates a catalog that reads the given index database
pub fn catalog_with_index(db_path: &Path) -> Catalog {
    let mut config = Config::default();
    config.index.database_path = db_path.display().to_string();
    Catalog::new(config)
}

pub fn dataset_path(set_id: u32) -> String {
    format!("/epstein/doj-disclosures/data-set-{}-files", set_id)
}

/// Listing markup for one page with two files and a pager marking `page`
///
/// A breadcrumb naming the data set also carries `aria-current`, as the
/// live site's does.
pub fn listing_html(base: &str, set_id: u32, page: u32) -> String {
    format!(
        r#"<html><body>
        <nav class="usa-breadcrumb"><ol>
            <li class="usa-breadcrumb__list-item"><a href="/epstein">Epstein</a></li>
            <li class="usa-breadcrumb__list-item usa-current" aria-current="page"><span>Data Set {set_id} Files</span></li>
        </ol></nav>
        <ul class="files">
            <li><a href="/epstein/files/DataSet%20{set_id}/EFTA{a:08}.pdf">EFTA{a:08}.pdf</a></li>
            <li><a href="{base}/epstein/files/DataSet%20{set_id}/EFTA{b:08}.pdf">EFTA{b:08}.pdf</a></li>
        </ul>
        <nav class="usa-pagination"><ul>
            <li><a href="?page=0" class="usa-pagination__button">1</a></li>
            <li><a href="?page={page}" class="usa-pagination__button usa-current" aria-current="page">{label}</a></li>
        </ul></nav>
        <a href="/epstein">Back to disclosures</a>
        </body></html>"#,
        a = page * 2 + 1,
        b = page * 2 + 2,
        label = page + 1
    )
}

/// Serves `reported` when `requested` is asked for, expecting `times` hits
pub async fn mount_listing_page(
    server: &MockServer,
    set_id: u32,
    requested: u32,
    reported: u32,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path(dataset_path(set_id)))
        .and(query_param("page", requested.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(&server.uri(), set_id, reported))
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Search response body with hits `start..end` out of `total`
pub fn search_body(total: u64, start: u64, end: u64) -> String {
    let hits: Vec<_> = (start..end)
        .map(|n| {
            serde_json::json!({
                "_source": {
                    "ORIGIN_FILE_NAME": format!("EFTA{:08}.pdf", n),
                    "ORIGIN_FILE_URI": format!(
                        "https://www.justice.gov/epstein/files/DataSet%20{}/EFTA{:08}.pdf",
                        n % 3 + 1,
                        n
                    )
                },
                "highlight": { "content": [format!("match <em>{}</em>", n)] }
            })
        })
        .collect();

    serde_json::json!({ "hits": { "total": { "value": total }, "hits": hits } }).to_string()
}

/// Serves remote search page `page` (1-based) of a `total`-hit result set
pub async fn mount_search_page(server: &MockServer, keys: &str, page: u64, total: u64, times: u64) {
    let start = (page - 1) * 10;
    let end = (start + 10).min(total).max(start);

    Mock::given(method("GET"))
        .and(path("/multimedia-search"))
        .and(query_param("keys", keys))
        .and(query_param("page", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(search_body(total, start, end))
                .insert_header("content-type", "application/json"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Writes an index database holding `(key, set_id, page, item)` rows
pub fn write_index(db_path: &Path, rows: &[(u64, u32, u32, u32)]) {
    let conn = Connection::open(db_path).expect("Failed to create index");
    initialize_schema(&conn).expect("Failed to create schema");

    for &(key, set_id, page, item) in rows {
        conn.execute(
            "INSERT INTO files (file_key, dataset_id, page, item, name, url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                key as i64,
                set_id,
                page,
                item,
                format!("EFTA{:08}.pdf", key),
                format!(
                    "https://www.justice.gov/epstein/files/DataSet%20{}/EFTA{:08}.pdf",
                    set_id, key
                )
            ],
        )
        .expect("Failed to insert row");
    }
}
