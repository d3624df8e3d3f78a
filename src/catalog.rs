//! Catalog facade
//!
//! One method per public operation. Each call opens its own remote session or
//! index handle and drops it before returning, error paths included.

use crate::config::{load_config, Config};
use crate::index::{IndexStore, IndexedRecord, NameQuery, SqliteIndex};
use crate::remote::RemoteSession;
use crate::resolver::{
    partition_meta, resolve, resolve_page, resolve_search_window, CatalogPage, CatalogPartition,
    PageRequest, RecordName, ResolvedLocation, SearchMatch, SearchQuery, SearchResult,
};
use crate::{LocatorError, Result};
use std::path::{Path, PathBuf};

/// Entry point for locating records in the remote catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    config: Config,
}

impl Catalog {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads and validates a TOML configuration file
    pub fn from_config_file(path: &Path) -> Result<Self> {
        Ok(Self::new(load_config(path)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn open_session(&self) -> Result<RemoteSession> {
        RemoteSession::open(&self.config.remote)
    }

    fn index_path(&self) -> PathBuf {
        PathBuf::from(&self.config.index.database_path)
    }

    /// Reports whether a data set exists and is public
    pub async fn dataset_meta(&self, set_id: u32) -> Result<CatalogPartition> {
        let session = self.open_session()?;
        partition_meta(&session, set_id).await
    }

    /// Fetches one listing page of a data set
    pub async fn dataset_page(&self, set_id: u32, request: PageRequest) -> Result<CatalogPage> {
        let session = self.open_session()?;
        resolve_page(&session, set_id, request).await
    }

    /// Runs a remote full-text search and returns one offset/limit window
    pub async fn search_files(
        &self,
        query: &SearchQuery,
        offset: u64,
        limit: u64,
    ) -> Result<SearchResult> {
        let session = self.open_session()?;
        resolve_search_window(&session, &self.config.search, query, offset, limit).await
    }

    /// Searches display names in the local index
    ///
    /// Build the query with [`NameQuery::substring`] or [`NameQuery::pattern`];
    /// both reject blank input before the index is opened.
    pub async fn search_index(
        &self,
        query: &NameQuery,
        offset: u64,
        limit: u64,
    ) -> Result<SearchResult> {
        if query.is_blank() {
            return Err(LocatorError::Validation {
                input: query.as_str().to_string(),
                reason: "name search needs a non-blank query".to_string(),
            });
        }
        let path = self.index_path();
        let query = query.clone();

        tokio::task::spawn_blocking(move || -> Result<SearchResult> {
            let index = SqliteIndex::open_read_only(&path)?;
            let (amount, records) = index.search_names(&query, offset, limit)?;
            Ok(SearchResult {
                amount,
                matches: records.into_iter().map(index_match).collect(),
            })
        })
        .await?
    }

    /// Resolves a record name to its exact or nearest catalog location
    pub async fn find_file(&self, name: &str, set_id: Option<u32>) -> Result<ResolvedLocation> {
        // Malformed names fail before the index is touched
        RecordName::parse(name)?;
        let path = self.index_path();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || -> Result<ResolvedLocation> {
            let index = SqliteIndex::open_read_only(&path)?;
            resolve(&index, &name, set_id)
        })
        .await?
    }
}

fn index_match(record: IndexedRecord) -> SearchMatch {
    SearchMatch {
        file_id: record.file_id(),
        set_id: Some(record.set_id),
        url: record.url,
        highlights: vec![record.name],
    }
}
