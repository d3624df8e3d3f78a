//! HTML parser for data set listing pages
//!
//! This module extracts from one listing page:
//! - The catalog file links (only those under the configured file prefix)
//! - The page number the server marks as current

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Selectors for the "current page" marker, tried in order
///
/// Each is scoped to a pager container. Breadcrumbs also carry
/// `aria-current="page"` and must not match.
const CURRENT_PAGE_SELECTORS: &[&str] = &[
    ".usa-pagination [aria-current='page']",
    ".usa-pagination .usa-current",
    "nav.pager [aria-current='page']",
    ".pager .pager__item.is-active",
];

/// One file link scraped from a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    /// Link text, or the last URL segment when the link has no text
    pub display_name: String,

    /// Absolute retrieval URL
    pub url: String,
}

/// Extracted information from a listing page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Page number reported as current, if the page has a pager
    pub reported_page: Option<u32>,

    /// Catalog files in page order
    pub items: Vec<PageItem>,
}

/// Parses a data set listing page
///
/// # Link Extraction Rules
///
/// - Only `<a href>` targets that resolve to a URL starting with
///   `file_url_prefix` are kept
/// - Relative links are resolved against `page_url`
/// - A URL listed twice on a page is kept once, at its first position
///
/// # Current Page
///
/// The marker's `page=` query parameter wins when the marker is a link,
/// since the visible label may use a different numbering. Otherwise the
/// first number in the marker text is used.
///
/// # Example
///
/// ```
/// use efta_locator::remote::parse_listing_page;
/// use url::Url;
///
/// let html = r#"<a href="/files/EFTA00000001.pdf">EFTA00000001.pdf</a>
///               <nav class="usa-pagination">
///                 <a href="?page=2" aria-current="page">3</a>
///               </nav>"#;
/// let page_url = Url::parse("https://example.com/set-1").unwrap();
/// let parsed = parse_listing_page(html, &page_url, "https://example.com/files/");
/// assert_eq!(parsed.reported_page, Some(2));
/// assert_eq!(parsed.items[0].display_name, "EFTA00000001.pdf");
/// ```
pub fn parse_listing_page(html: &str, page_url: &Url, file_url_prefix: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        reported_page: extract_current_page(&document, page_url),
        items: extract_items(&document, page_url, file_url_prefix),
    }
}

fn extract_items(document: &Html, page_url: &Url, file_url_prefix: &str) -> Vec<PageItem> {
    let mut items: Vec<PageItem> = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return items;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(url) = resolve_link(href, page_url) else {
            continue;
        };
        if !url.as_str().starts_with(file_url_prefix) {
            continue;
        }
        if items.iter().any(|item| item.url == url.as_str()) {
            continue;
        }

        let text = element_text(&element);
        let display_name = if text.is_empty() {
            last_segment(&url)
        } else {
            text
        };

        items.push(PageItem {
            display_name,
            url: url.to_string(),
        });
    }

    items
}

fn extract_current_page(document: &Html, page_url: &Url) -> Option<u32> {
    for raw in CURRENT_PAGE_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };

        for element in document.select(&selector) {
            if let Some(page) = element
                .value()
                .attr("href")
                .and_then(|href| page_param(href, page_url))
                .or_else(|| first_number(&element_text(&element)))
            {
                return Some(page);
            }
        }
    }
    None
}

/// Reads the `page` query parameter of an href resolved against `page_url`
fn page_param(href: &str, page_url: &Url) -> Option<u32> {
    let url = page_url.join(href.trim()).ok()?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.trim().parse().ok());
    page
}

fn first_number(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn last_segment(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back().map(str::to_string))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| url.to_string())
}

/// Resolves a link href to an absolute http(s) URL
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    base_url
        .join(href)
        .ok()
        .filter(|url| url.scheme() == "http" || url.scheme() == "https")
}
