//! Local index store
//!
//! The index maps numeric record keys to where each file was seen in the
//! remote catalog. It is populated elsewhere; this crate only opens it
//! read-only and runs exact and nearest-neighbour lookups.

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::SqliteIndex;
pub use traits::{IndexError, IndexResult, IndexStore, LookupMode, NameQuery};

/// Represents one indexed catalog file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRecord {
    /// Numeric key parsed from the `EFTA########` name
    pub key: u64,
    pub set_id: u32,

    /// Listing page the file was seen on
    pub page: u32,

    /// Position within that page, when known
    pub item: Option<u32>,

    pub name: String,
    pub url: String,
}

impl IndexedRecord {
    /// Zero-padded key as used in file names
    pub fn file_id(&self) -> String {
        format!("{:08}", self.key)
    }
}
