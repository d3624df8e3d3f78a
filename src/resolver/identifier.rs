//! Record name resolution against the local index
//!
//! A record name is `EFTA` followed by eight digits. Resolution returns the
//! exact indexed location when there is one, and otherwise the location of
//! the nearest indexed neighbour so the caller can still browse to the right
//! data set and page.

use crate::index::{IndexStore, IndexedRecord, LookupMode};
use crate::{LocatorError, Result};
use std::fmt;
use std::str::FromStr;

/// Fixed prefix of every record name
pub const RECORD_PREFIX: &str = "EFTA";

/// Number of digits after the prefix
pub const RECORD_DIGITS: usize = 8;

/// A validated record name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordName {
    key: u64,
}

impl RecordName {
    /// Parses `EFTA` + exactly eight ASCII digits
    ///
    /// # Examples
    ///
    /// ```
    /// use efta_locator::RecordName;
    ///
    /// let name = RecordName::parse("EFTA00078922").unwrap();
    /// assert_eq!(name.key(), 78922);
    /// assert_eq!(name.file_id(), "00078922");
    /// assert!(RecordName::parse("EFTA78922").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = |reason: &str| LocatorError::Validation {
            input: name.to_string(),
            reason: reason.to_string(),
        };

        let digits = name
            .strip_prefix(RECORD_PREFIX)
            .ok_or_else(|| invalid("record names start with EFTA"))?;

        if digits.len() != RECORD_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("record names end in exactly eight digits"));
        }

        let key = digits
            .parse()
            .map_err(|_| invalid("record number out of range"))?;
        Ok(Self { key })
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    /// Zero-padded digits, e.g. `00078922`
    pub fn file_id(&self) -> String {
        format!("{:0width$}", self.key, width = RECORD_DIGITS)
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", RECORD_PREFIX, self.file_id())
    }
}

impl FromStr for RecordName {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Where a record lives, or would live, in the remote catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub set_id: u32,
    pub page: u32,
    pub item: Option<u32>,
    pub name: String,
    pub url: String,

    /// True when the record itself is in the index
    pub indexed: bool,

    /// The record's own key on an exact hit, otherwise the nearest indexed
    /// key strictly below the target
    pub file_id_before: Option<String>,

    /// The record's own key on an exact hit, otherwise the nearest indexed
    /// key strictly above the target
    pub file_id_after: Option<String>,
}

/// Resolves a record name to its catalog location
///
/// # Resolution Order
///
/// 1. Exact key match (scoped to `set_id` when given): `indexed = true`,
///    both bracket ids equal the record's own id
/// 2. Otherwise the nearest records strictly below and above the key; the
///    location comes from the lower one when both exist
/// 3. Neither bracket exists: not found
///
/// For an approximate result, `name` is the requested record and `url` is
/// the bracket's URL with its file name swapped for the requested one.
///
/// # Returns
///
/// * `Ok(ResolvedLocation)` - Exact or bracketed location
/// * `Err(LocatorError::Validation)` - Malformed name; the index is not queried
/// * `Err(LocatorError::NotFound)` - No indexed neighbour in scope
pub fn resolve<S: IndexStore + ?Sized>(
    index: &S,
    name: &str,
    set_id: Option<u32>,
) -> Result<ResolvedLocation> {
    let record = RecordName::parse(name)?;
    let key = record.key();

    if let Some(hit) = index.lookup(LookupMode::Exact, key, set_id)? {
        tracing::info!(
            "{} is indexed in data set {} page {}",
            record,
            hit.set_id,
            hit.page
        );
        let file_id = hit.file_id();
        return Ok(ResolvedLocation {
            set_id: hit.set_id,
            page: hit.page,
            item: hit.item,
            name: hit.name,
            url: hit.url,
            indexed: true,
            file_id_before: Some(file_id.clone()),
            file_id_after: Some(file_id),
        });
    }

    let before = index.lookup(LookupMode::Below, key, set_id)?;
    let after = index.lookup(LookupMode::Above, key, set_id)?;

    let Some(anchor) = before.as_ref().or(after.as_ref()) else {
        return Err(LocatorError::NotFound {
            key: record.to_string(),
            partition: set_id,
        });
    };

    tracing::info!(
        "{} is not indexed; nearest neighbour {} in data set {} page {}",
        record,
        anchor.file_id(),
        anchor.set_id,
        anchor.page
    );

    Ok(ResolvedLocation {
        set_id: anchor.set_id,
        page: anchor.page,
        item: anchor.item,
        name: record.to_string(),
        url: neighbour_url(anchor, &record),
        indexed: false,
        file_id_before: before.as_ref().map(IndexedRecord::file_id),
        file_id_after: after.as_ref().map(IndexedRecord::file_id),
    })
}

/// The anchor's URL with its record name replaced by `record`
fn neighbour_url(anchor: &IndexedRecord, record: &RecordName) -> String {
    let anchor_name = format!("{}{}", RECORD_PREFIX, anchor.file_id());
    match anchor.url.rfind(&anchor_name) {
        Some(pos) => {
            let mut url = anchor.url.clone();
            url.replace_range(pos..pos + anchor_name.len(), &record.to_string());
            url
        }
        None => anchor.url.clone(),
    }
}
