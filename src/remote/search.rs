//! Search API response decoding
//!
//! The remote search endpoint answers with an Elasticsearch-style document.
//! This module maps it into [`ParsedSearchPage`]; any field the server leaves
//! out defaults to empty or zero.

use crate::resolver::RecordName;
use serde::Deserialize;

/// One normalized search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Record key (eight digits for `EFTA` names, the file stem otherwise)
    pub file_id: String,

    /// Data set parsed from the file URL or name
    pub set_id: Option<u32>,

    pub url: String,

    /// Highlighted text fragments around each match
    pub highlights: Vec<String>,
}

/// One decoded page of search results
#[derive(Debug, Clone, Default)]
pub struct ParsedSearchPage {
    /// Total hit count across all pages
    pub total_hits: u64,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResponse {
    hits: RawHits,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHits {
    total: RawTotal,
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTotal {
    Count(u64),
    Object {
        #[serde(default)]
        value: u64,
    },
}

impl Default for RawTotal {
    fn default() -> Self {
        Self::Count(0)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHit {
    #[serde(rename = "_source")]
    source: RawSource,
    highlight: RawHighlight,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSource {
    #[serde(rename = "ORIGIN_FILE_NAME")]
    file_name: String,
    #[serde(rename = "ORIGIN_FILE_URI")]
    file_uri: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHighlight {
    content: Vec<String>,
}

/// Decodes a search API response body
///
/// # Returns
///
/// * `Ok(ParsedSearchPage)` - Normalized page, possibly with no hits
/// * `Err(serde_json::Error)` - Body is not JSON or has wrongly typed fields
pub fn parse_search_response(body: &[u8]) -> Result<ParsedSearchPage, serde_json::Error> {
    let raw: RawResponse = serde_json::from_slice(body)?;

    let total_hits = match raw.hits.total {
        RawTotal::Count(n) | RawTotal::Object { value: n } => n,
    };

    let hits = raw
        .hits
        .hits
        .into_iter()
        .map(|hit| {
            let name = if hit.source.file_name.is_empty() {
                file_name_from_uri(&hit.source.file_uri)
            } else {
                hit.source.file_name.clone()
            };

            SearchHit {
                file_id: file_id_from_name(&name),
                set_id: parse_set_id(&hit.source.file_uri).or_else(|| parse_set_id(&name)),
                url: hit.source.file_uri,
                highlights: hit.highlight.content,
            }
        })
        .collect();

    Ok(ParsedSearchPage { total_hits, hits })
}

/// Record key for a file name like `EFTA00012345.pdf`
fn file_id_from_name(name: &str) -> String {
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    match RecordName::parse(stem) {
        Ok(record) => record.file_id(),
        Err(_) => stem.to_string(),
    }
}

fn file_name_from_uri(uri: &str) -> String {
    uri.rsplit('/').next().unwrap_or(uri).to_string()
}

/// Finds the number following a `DataSet` marker
///
/// Accepts `DataSet 9`, `DataSet%209`, `DataSet_9`, `DataSet-9` and `DataSet9`,
/// case-insensitively.
pub fn parse_set_id(text: &str) -> Option<u32> {
    let lower = text.to_ascii_lowercase();
    let mut rest = lower.as_str();

    while let Some(pos) = rest.find("dataset") {
        let after = &rest[pos + "dataset".len()..];
        let after = after.strip_prefix("%20").unwrap_or(after);
        let after = after.trim_start_matches([' ', '_', '-', '+']);
        let digits: String = after.chars().take_while(char::is_ascii_digit).collect();
        if let Ok(id) = digits.parse() {
            return Some(id);
        }
        rest = &rest[pos + 1..];
    }
    None
}
