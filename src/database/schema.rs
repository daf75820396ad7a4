//! Archive schema, versioned through SQLite's `user_version` pragma.

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Ordered schema steps; step `n` brings the archive to version `n + 1`
const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE documents (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL DEFAULT '',
        translation TEXT,
        created TEXT NOT NULL
    );
    "#,
    // Month listing and month filters scan by creation date
    "CREATE INDEX idx_documents_created ON documents(created);",
];

/// Schema version of a fully migrated archive
pub const SCHEMA_VERSION: i32 = MIGRATIONS.len() as i32;

/// Bring the archive up to [`SCHEMA_VERSION`]
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let current = schema_version(conn)?;
    if current >= SCHEMA_VERSION {
        debug!("Archive schema is up to date (v{})", current);
        return Ok(());
    }

    info!("Migrating archive schema from v{} to v{}", current, SCHEMA_VERSION);

    for (step, sql) in MIGRATIONS.iter().enumerate().skip(current.max(0) as usize) {
        let version = step + 1;
        conn.execute_batch(&format!("BEGIN; {} PRAGMA user_version = {}; COMMIT;", sql, version))
            .with_context(|| format!("Failed to apply archive schema v{}", version))?;
    }

    Ok(())
}

/// Schema version stored in the database file, 0 for a fresh file
pub fn schema_version(conn: &Connection) -> Result<i32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .context("Failed to read archive schema version")
}
