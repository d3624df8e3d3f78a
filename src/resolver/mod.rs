//! Resolver module: the locator's core logic
//!
//! This module contains:
//! - Listing page resolution (absolute, last, relative pages)
//! - Offset/limit windows over the page-based search API
//! - Record name resolution with nearest-neighbour fallback
//! - Data set visibility probing
//!
//! Every function takes its session or index handle by reference and keeps
//! no state between calls.

mod identifier;
mod pagination;
mod partition;

pub use identifier::{resolve, RecordName, ResolvedLocation, RECORD_DIGITS, RECORD_PREFIX};
pub use pagination::{
    relative_target, resolve_page, resolve_search_window, window_start, CatalogPage,
    PageRequest, SearchMatch, SearchQuery, SearchResult, LAST_PAGE_PROBE,
};
pub use partition::{partition_meta, CatalogPartition, Visibility};
