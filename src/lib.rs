//! EFTA-Locator: finds records in the paginated public EFTA disclosure catalog
//!
//! The remote catalog only offers two access paths: HTML listing pages with a
//! fixed number of files per page, and a page-based full-text search API. This
//! crate turns both into caller-friendly requests (relative pages, offset/limit
//! windows) and resolves `EFTA########` record names against a local index.

pub mod catalog;
pub mod config;
pub mod index;
pub mod logging;
pub mod remote;
pub mod resolver;

use thiserror::Error;

/// Main error type for EFTA-Locator operations
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input '{input}': {reason}")]
    Validation { input: String, reason: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    Transport { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Record {key} not found{}", partition_suffix(.partition))]
    NotFound { key: String, partition: Option<u32> },

    #[error("Malformed search response from {url}: {source}")]
    SearchDecode {
        url: String,
        source: serde_json::Error,
    },

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

fn partition_suffix(partition: &Option<u32>) -> String {
    match partition {
        Some(id) => format!(" in data set {}", id),
        None => String::new(),
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for EFTA-Locator operations
pub type Result<T> = std::result::Result<T, LocatorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::Config;
pub use index::{IndexStore, IndexedRecord, LookupMode, NameQuery, SqliteIndex};
pub use remote::{Fetch, HttpFetcher, RemoteSession};
pub use resolver::{
    CatalogPage, CatalogPartition, PageRequest, RecordName, ResolvedLocation, SearchMatch,
    SearchQuery, SearchResult, Visibility,
};
