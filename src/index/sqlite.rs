//! SQLite index implementation
//!
//! This module provides a read-only SQLite implementation of the IndexStore trait.

use crate::index::traits::{IndexError, IndexResult, IndexStore, LookupMode, NameQuery};
use crate::index::IndexedRecord;
use regex::Regex;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;

const SELECT_COLUMNS: &str = "SELECT file_key, dataset_id, page, item, name, url FROM files";

/// Read-only SQLite index handle
pub struct SqliteIndex {
    conn: Connection,
}

impl SqliteIndex {
    /// Opens an existing index database read-only
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteIndex)` - Successfully opened database
    /// * `Err(IndexError::Missing)` - No file at `path`
    /// * `Err(IndexError::Corrupt)` - Database has no `files` table
    /// * `Err(IndexError::Sqlite)` - File exists but could not be opened
    pub fn open_read_only(path: &Path) -> IndexResult<Self> {
        if !path.exists() {
            return Err(IndexError::Missing(path.display().to_string()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.execute_batch("PRAGMA query_only = ON;")?;

        let has_files: bool = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'files')",
            [],
            |row| row.get(0),
        )?;
        if !has_files {
            return Err(IndexError::Corrupt(format!(
                "{} has no files table",
                path.display()
            )));
        }

        tracing::debug!("Opened index {}", path.display());
        Ok(Self { conn })
    }

    /// Creates a populated in-memory index (for testing)
    #[cfg(test)]
    pub fn new_in_memory(records: &[IndexedRecord]) -> IndexResult<Self> {
        let conn = Connection::open_in_memory()?;
        crate::index::initialize_schema(&conn)?;
        for record in records {
            conn.execute(
                "INSERT INTO files (file_key, dataset_id, page, item, name, url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.key as i64,
                    record.set_id,
                    record.page,
                    record.item,
                    record.name,
                    record.url
                ],
            )?;
        }
        Ok(Self { conn })
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<IndexedRecord> {
    let raw_key: i64 = row.get(0)?;
    let key = u64::try_from(raw_key)
        .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, raw_key))?;

    Ok(IndexedRecord {
        key,
        set_id: row.get(1)?,
        page: row.get(2)?,
        item: row.get(3)?,
        name: row.get(4)?,
        url: row.get(5)?,
    })
}

/// Escapes LIKE wildcards so the query matches literally
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl IndexStore for SqliteIndex {
    fn lookup(
        &self,
        mode: LookupMode,
        key: u64,
        set_id: Option<u32>,
    ) -> IndexResult<Option<IndexedRecord>> {
        let (condition, order) = match mode {
            LookupMode::Exact => ("file_key = ?1", "dataset_id ASC"),
            LookupMode::Below => ("file_key < ?1", "file_key DESC, dataset_id ASC"),
            LookupMode::Above => ("file_key > ?1", "file_key ASC, dataset_id ASC"),
        };
        let sql = format!(
            "{SELECT_COLUMNS} WHERE {condition} AND (?2 IS NULL OR dataset_id = ?2)
             ORDER BY {order} LIMIT 1"
        );

        let record = self
            .conn
            .prepare_cached(&sql)?
            .query_row(params![to_sql_int(key), set_id], row_to_record)
            .optional()?;

        tracing::debug!(
            "Index lookup {:?} key={} set={:?} -> {}",
            mode,
            key,
            set_id,
            record.as_ref().map_or("none".to_string(), IndexedRecord::file_id)
        );

        Ok(record)
    }

    fn search_names(
        &self,
        query: &NameQuery,
        offset: u64,
        limit: u64,
    ) -> IndexResult<(u64, Vec<IndexedRecord>)> {
        match query {
            NameQuery::Substring(text) => self.search_substring(text, offset, limit),
            NameQuery::Pattern(regex) => self.search_pattern(regex, offset, limit),
        }
    }
}

impl SqliteIndex {
    fn search_substring(
        &self,
        text: &str,
        offset: u64,
        limit: u64,
    ) -> IndexResult<(u64, Vec<IndexedRecord>)> {
        let pattern = format!("%{}%", escape_like(text));

        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM files WHERE name LIKE ?1 ESCAPE '\\'",
            params![pattern],
            |row| row.get(0),
        )?;

        let sql = format!(
            "{SELECT_COLUMNS} WHERE name LIKE ?1 ESCAPE '\\'
             ORDER BY file_key ASC, dataset_id ASC LIMIT ?2 OFFSET ?3"
        );
        let records = self
            .conn
            .prepare_cached(&sql)?
            .query_map(
                params![pattern, to_sql_int(limit), to_sql_int(offset)],
                row_to_record,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total.max(0) as u64, records))
    }

    /// Scans every name in key order; SQLite has no built-in REGEXP
    fn search_pattern(
        &self,
        regex: &Regex,
        offset: u64,
        limit: u64,
    ) -> IndexResult<(u64, Vec<IndexedRecord>)> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY file_key ASC, dataset_id ASC");
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], row_to_record)?;

        let mut total = 0u64;
        let mut window = Vec::new();
        for row in rows {
            let record = row?;
            if !regex.is_match(&record.name) {
                continue;
            }
            if total >= offset && (window.len() as u64) < limit {
                window.push(record);
            }
            total += 1;
        }

        tracing::debug!("Pattern {} matched {} index names", regex.as_str(), total);
        Ok((total, window))
    }
}
