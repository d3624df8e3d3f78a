//! Data set metadata
//!
//! Visibility is not published anywhere; it is inferred from how the listing
//! page answers at the moment of the request.

use crate::remote::{Fetch, RemoteSession};
use crate::Result;
use chrono::{DateTime, Utc};

/// How a data set currently answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Listing page returned 404
    Nonexistent,

    /// Listing page returned 401 or 403
    Private,

    /// Listing page returned 200
    Public,
}

impl Visibility {
    /// Maps a listing status code; `None` for codes with no meaning here
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200 => Some(Self::Public),
            401 | 403 => Some(Self::Private),
            404 => Some(Self::Nonexistent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nonexistent => "nonexistent",
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

/// Point-in-time observation of one data set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPartition {
    pub id: u32,
    pub visibility: Visibility,

    /// From the `Last-Modified` header, when the server sent a valid one
    pub last_modified: Option<DateTime<Utc>>,
}

/// Fetches a data set's listing once and reports its visibility
///
/// # Returns
///
/// * `Ok(CatalogPartition)` - For 200, 401, 403 and 404 answers
/// * `Err(LocatorError::Transport)` - Any other status
pub async fn partition_meta<F: Fetch>(
    session: &RemoteSession<F>,
    set_id: u32,
) -> Result<CatalogPartition> {
    let url = session.dataset_url(set_id)?;
    let response = session.get(url, &[200, 401, 403, 404]).await?;

    // The whitelist above only contains mapped codes
    let visibility = Visibility::from_status(response.status).unwrap_or(Visibility::Nonexistent);

    let last_modified = response
        .header("last-modified")
        .and_then(parse_http_date);

    tracing::debug!(
        "Data set {} is {} (last modified {:?})",
        set_id,
        visibility.as_str(),
        last_modified
    );

    Ok(CatalogPartition {
        id: set_id,
        visibility,
        last_modified,
    })
}

/// Parses an HTTP date such as `Tue, 15 Nov 1994 08:12:31 GMT`
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}
