//! Index database schema
//!
//! The locator only reads this table. The schema lives here so that whatever
//! populates the index and the tests agree on one definition.

/// SQL schema for the index database
pub const SCHEMA_SQL: &str = r#"
-- One row per catalog file seen on a listing page
CREATE TABLE IF NOT EXISTS files (
    file_key INTEGER NOT NULL,
    dataset_id INTEGER NOT NULL,
    page INTEGER NOT NULL,
    item INTEGER,
    name TEXT NOT NULL,
    url TEXT NOT NULL,
    PRIMARY KEY (dataset_id, file_key)
);

CREATE INDEX IF NOT EXISTS idx_files_key ON files(file_key);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
