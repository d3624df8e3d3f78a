//! Remote catalog access
//!
//! This module holds the collaborators that talk to the remote side:
//! - HTTP fetching with the browser fingerprint
//! - Listing page parsing (file links and current page marker)
//! - Search API response decoding
//! - The per-operation session handle

mod fetcher;
mod parser;
mod search;
mod session;

pub use fetcher::{build_http_client, Fetch, FetchRequest, FetchResponse, HttpFetcher};
pub use parser::{parse_listing_page, PageItem, ParsedPage};
pub use search::{parse_search_response, parse_set_id, ParsedSearchPage, SearchHit};
pub use session::RemoteSession;
