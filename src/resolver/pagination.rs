//! Page resolution for listings and search
//!
//! The remote catalog only understands page numbers. This module converts:
//! - Absolute, last-page and relative listing requests into listing fetches
//! - Offset/limit search windows into a run of 1-based search page fetches,
//!   slicing the first and last pages as needed

use crate::config::SearchConfig;
use crate::remote::{
    parse_listing_page, parse_search_response, Fetch, PageItem, RemoteSession, SearchHit,
};
use crate::{LocatorError, Result};
use url::Url;

/// Page number sent to make the server clamp to its real last page
///
/// Larger than any listing the catalog can have.
pub const LAST_PAGE_PROBE: u32 = 1 << 31;

/// Which listing page a caller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// An absolute page number
    Page(u32),

    /// The last page, whatever its number is
    Last,

    /// Counted back from the end: `-1` is the last page, `-2` the one before
    Relative(i64),
}

impl PageRequest {
    /// Converts a legacy integer page argument
    ///
    /// Non-negative values below [`LAST_PAGE_PROBE`] are absolute pages,
    /// values at or above it mean [`PageRequest::Last`], negative values are
    /// relative to the end.
    pub fn from_raw(raw: i64) -> Self {
        if raw >= i64::from(LAST_PAGE_PROBE) {
            Self::Last
        } else if raw >= 0 {
            Self::Page(raw as u32)
        } else {
            Self::Relative(raw)
        }
    }
}

/// Target page for a relative request, given the last page
///
/// `last + offset + 1`, clamped into `0..=last`.
pub fn relative_target(last: u32, offset: i64) -> u32 {
    let target = i64::from(last).saturating_add(offset).saturating_add(1);
    target.clamp(0, i64::from(last)) as u32
}

/// One listing page as reported by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub set_id: u32,

    /// Page number the server reported as current
    pub page: u32,

    pub items: Vec<PageItem>,
}

/// Fetches one listing page of a data set
///
/// # Fetch Cost
///
/// | Request | Remote fetches |
/// |---------|----------------|
/// | `Page(n)` | 1 |
/// | `Last` | 1 |
/// | `Relative(-1)` | 1 |
/// | `Relative(n)`, other | 2 (last page, then target) |
///
/// The returned page number is always the server's report, which differs
/// from the request when the server clamps an out-of-range page.
///
/// # Returns
///
/// * `Ok(CatalogPage)` - Possibly with no items
/// * `Err(LocatorError::Transport)` - Any non-200 status
pub async fn resolve_page<F: Fetch>(
    session: &RemoteSession<F>,
    set_id: u32,
    request: PageRequest,
) -> Result<CatalogPage> {
    match request {
        PageRequest::Page(page) => fetch_listing(session, set_id, page).await,
        PageRequest::Last => fetch_listing(session, set_id, LAST_PAGE_PROBE).await,
        PageRequest::Relative(offset) => {
            let last = fetch_listing(session, set_id, LAST_PAGE_PROBE).await?;
            let target = relative_target(last.page, offset);
            tracing::debug!(
                "Relative page {} of data set {} resolves to {} (last is {})",
                offset,
                set_id,
                target,
                last.page
            );

            if target == last.page {
                return Ok(last);
            }
            fetch_listing(session, set_id, target).await
        }
    }
}

async fn fetch_listing<F: Fetch>(
    session: &RemoteSession<F>,
    set_id: u32,
    requested: u32,
) -> Result<CatalogPage> {
    let url = session.dataset_page_url(set_id, requested)?;
    let response = session.get(url.clone(), &[200]).await?;

    let base_url = Url::parse(&response.final_url).unwrap_or(url);
    let parsed = parse_listing_page(
        &response.text(),
        &base_url,
        &session.config().file_url_prefix,
    );

    let page = match parsed.reported_page {
        Some(page) => page,
        None if requested == LAST_PAGE_PROBE => {
            tracing::warn!(
                "No current page marker on data set {}; treating it as a single page",
                set_id
            );
            0
        }
        None => requested,
    };

    if parsed.items.is_empty() {
        tracing::debug!("Data set {} page {} lists no files", set_id, page);
    }

    Ok(CatalogPage {
        set_id,
        page,
        items: parsed.items,
    })
}

/// Search terms sent to the remote full-text search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keys: Vec<String>,

    /// Passed through to the remote as its `filter` parameter
    pub filter: Option<String>,
}

impl SearchQuery {
    /// Builds a query, dropping blank terms
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(Into::into)
                .map(|key: String| key.trim().to_string())
                .filter(|key| !key.is_empty())
                .collect(),
            filter: None,
        }
    }

    /// Narrows the query with a remote filter; blank filters are ignored
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into().trim().to_string();
        self.filter = (!filter.is_empty()).then_some(filter);
        self
    }
}

/// One search match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub file_id: String,
    pub set_id: Option<u32>,
    pub url: String,
    pub highlights: Vec<String>,
}

impl From<SearchHit> for SearchMatch {
    fn from(hit: SearchHit) -> Self {
        Self {
            file_id: hit.file_id,
            set_id: hit.set_id,
            url: hit.url,
            highlights: hit.highlights,
        }
    }
}

/// An offset/limit window of search matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Total matches the source reported, independent of the window
    pub amount: u64,
    pub matches: Vec<SearchMatch>,
}

/// First remote page and in-page skip for an offset
///
/// Remote pages are 1-based.
pub fn window_start(offset: u64, page_size: u32) -> (u64, usize) {
    let page_size = u64::from(page_size.max(1));
    (offset / page_size + 1, (offset % page_size) as usize)
}

/// Collects `limit` search matches starting at the `offset`-th overall match
///
/// # Algorithm
///
/// 1. Start at remote page `offset / page_size + 1`, skipping
///    `offset % page_size` hits of that first page only
/// 2. Take hits page by page until `limit` are collected or a page comes
///    back empty
/// 3. `amount` is the total reported by the first fetch
///
/// At least one page is always fetched, so `limit == 0` still reports
/// `amount`. Fetching stops after `max_pages` pages regardless.
///
/// # Returns
///
/// * `Ok(SearchResult)` - Up to `limit` matches
/// * `Err(LocatorError::Validation)` - Query has no terms
/// * `Err(LocatorError::Transport)` - A page fetch returned non-200
/// * `Err(LocatorError::SearchDecode)` - A page body was not valid JSON
pub async fn resolve_search_window<F: Fetch>(
    session: &RemoteSession<F>,
    settings: &SearchConfig,
    query: &SearchQuery,
    offset: u64,
    limit: u64,
) -> Result<SearchResult> {
    if query.keys.is_empty() {
        return Err(LocatorError::Validation {
            input: String::new(),
            reason: "search needs at least one non-blank key".to_string(),
        });
    }

    let (mut page, mut skip) = window_start(offset, settings.page_size);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let mut amount = None;
    let mut matches: Vec<SearchMatch> = Vec::new();
    let mut fetched = 0u32;

    loop {
        if fetched >= settings.max_pages {
            tracing::warn!(
                "Search for {:?} stopped after {} pages with {} matches",
                query.keys,
                fetched,
                matches.len()
            );
            break;
        }

        let url = session.search_page_url(&query.keys, query.filter.as_deref(), page)?;
        let response = session.get(url.clone(), &[200]).await?;
        let parsed =
            parse_search_response(&response.body).map_err(|source| LocatorError::SearchDecode {
                url: url.to_string(),
                source,
            })?;
        fetched += 1;

        amount.get_or_insert(parsed.total_hits);

        if parsed.hits.is_empty() {
            tracing::debug!("Search page {} is empty; results exhausted", page);
            break;
        }

        let wanted = limit.saturating_sub(matches.len());
        matches.extend(
            parsed
                .hits
                .into_iter()
                .skip(skip)
                .take(wanted)
                .map(SearchMatch::from),
        );
        skip = 0;

        if matches.len() >= limit {
            break;
        }
        page += 1;
    }

    Ok(SearchResult {
        amount: amount.unwrap_or(0),
        matches,
    })
}
