use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Open a connection to the SQLite file, creating the parent directory and the
/// file itself when they do not exist yet.
pub(crate) fn open_connection(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
    }

    Connection::open(path).context("failed to open SQLite database")
}

/// Create the `books` table when it is missing. `IF NOT EXISTS` leaves an
/// existing table untouched, so this runs on every startup.
///
/// `AUTOINCREMENT` keeps ids monotonic: a removed book's id is never handed to
/// a later insert.
pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            genre TEXT,
            year INTEGER
        )",
        [],
    )
    .context("failed to create books table")?;

    Ok(())
}
