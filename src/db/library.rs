use std::path::{Path, PathBuf};

use anyhow::Result;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::models::{Book, NewBook};

use super::books::{delete_book, fetch_books, insert_book, search_books};
use super::connection::{ensure_schema, open_connection};

/// Handle to the catalog file.
///
/// Only the path is kept. Each operation opens its own connection, runs a
/// single statement in autocommit mode, and drops the connection before
/// returning, whether the statement succeeded or not. No connection outlives
/// the call that opened it.
#[derive(Debug, Clone)]
pub struct Library {
    path: PathBuf,
}

impl Library {
    /// Point at `path`, creating the file and the `books` table if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let library = Self { path: path.into() };
        library.ensure_schema()?;
        Ok(library)
    }

    /// Location of the SQLite file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Idempotently create the `books` table.
    pub fn ensure_schema(&self) -> Result<()> {
        self.with_connection(ensure_schema)?;
        debug!(path = %self.path.display(), "books schema ready");
        Ok(())
    }

    /// Store a validated book; duplicates are allowed.
    pub fn add_book(&self, book: NewBook) -> Result<Book> {
        let book = self.with_connection(|conn| insert_book(conn, book))?;
        info!(id = book.id, title = %book.title, "added book");
        Ok(book)
    }

    /// Remove the book with `id`. `Ok(false)` means no such book existed.
    pub fn remove_book(&self, id: i64) -> Result<bool> {
        let removed = self.with_connection(|conn| delete_book(conn, id))?;
        if removed {
            info!(id, "removed book");
        } else {
            info!(id, "remove requested for missing book");
        }
        Ok(removed)
    }

    /// All books in insertion order.
    pub fn list_books(&self) -> Result<Vec<Book>> {
        let books = self.with_connection(fetch_books)?;
        debug!(count = books.len(), "listed books");
        Ok(books)
    }

    /// Literal, ASCII case-insensitive substring match over title, author and
    /// genre.
    pub fn search_books(&self, query: &str) -> Result<Vec<Book>> {
        let books = self.with_connection(|conn| search_books(conn, query))?;
        debug!(query, count = books.len(), "searched books");
        Ok(books)
    }

    fn with_connection<T>(&self, op: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = open_connection(&self.path)?;
        op(&conn)
    }
}
