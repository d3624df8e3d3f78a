//! Index store traits and error types
//!
//! This module defines the read-only interface the identifier resolver uses
//! to query the local index, and its error type.

use crate::index::IndexedRecord;
use crate::{LocatorError, Result};
use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Index database not found: {0}")]
    Missing(String),

    #[error("Corrupt index: {0}")]
    Corrupt(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for index operations
pub type IndexResult<T> = std::result::Result<T, IndexError>;

/// Which record a lookup asks for relative to the target key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// The record whose key equals the target
    Exact,

    /// The nearest record with a strictly smaller key
    Below,

    /// The nearest record with a strictly larger key
    Above,
}

/// How a name search matches display names
///
/// Both forms are case-insensitive.
#[derive(Debug, Clone)]
pub enum NameQuery {
    /// Literal substring
    Substring(String),

    /// Regular expression, matched anywhere in the name
    Pattern(Regex),
}

impl NameQuery {
    /// Literal substring query; surrounding whitespace is dropped
    ///
    /// # Returns
    ///
    /// * `Err(LocatorError::Validation)` - The text is blank
    pub fn substring(text: &str) -> Result<Self> {
        Ok(Self::Substring(non_blank(text)?.to_string()))
    }

    /// Regular expression query
    ///
    /// # Returns
    ///
    /// * `Err(LocatorError::Validation)` - The expression is blank or does not compile
    pub fn pattern(expr: &str) -> Result<Self> {
        let expr = non_blank(expr)?;
        RegexBuilder::new(expr)
            .case_insensitive(true)
            .build()
            .map(Self::Pattern)
            .map_err(|e| LocatorError::Validation {
                input: expr.to_string(),
                reason: e.to_string(),
            })
    }
}

impl NameQuery {
    /// True for a query that would match every name
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Substring(text) => text.trim().is_empty(),
            Self::Pattern(regex) => regex.as_str().trim().is_empty(),
        }
    }

    /// The query text as given
    pub fn as_str(&self) -> &str {
        match self {
            Self::Substring(text) => text,
            Self::Pattern(regex) => regex.as_str(),
        }
    }
}

fn non_blank(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LocatorError::Validation {
            input: text.to_string(),
            reason: "name search needs a non-blank query".to_string(),
        });
    }
    Ok(trimmed)
}

/// Read-only view of the local index
///
/// Every query takes an optional data set scope. `None` searches across all
/// data sets; ties on key are broken by the lowest data set id.
pub trait IndexStore {
    /// Finds one record relative to `key`
    fn lookup(
        &self,
        mode: LookupMode,
        key: u64,
        set_id: Option<u32>,
    ) -> IndexResult<Option<IndexedRecord>>;

    /// Searches display names
    ///
    /// # Returns
    ///
    /// The total number of matching records and the `offset`/`limit` window
    /// of them, ordered by key then data set.
    fn search_names(
        &self,
        query: &NameQuery,
        offset: u64,
        limit: u64,
    ) -> IndexResult<(u64, Vec<IndexedRecord>)>;
}
