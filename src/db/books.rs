use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

use crate::models::{Book, NewBook};

/// Escape character used in every `LIKE ... ESCAPE` clause below.
const LIKE_ESCAPE: char = '\\';

/// Build the `LIKE` pattern for a substring search.
///
/// `%` and `_` typed by the user match themselves rather than acting as
/// wildcards, so "100%" finds titles containing "100%" and nothing else. The
/// escape character is escaped too. This is the only place that decides how
/// search text maps onto SQLite pattern syntax.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Map a `SELECT id, title, author, genre, year` row onto a [`Book`]. A NULL
/// genre (possible in files written by other tools) reads as empty and a NULL
/// year as `None`.
fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        genre: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        year: row.get(4)?,
    })
}

/// Insert a validated book and echo it back with its new id.
pub(crate) fn insert_book(conn: &Connection, book: NewBook) -> Result<Book> {
    conn.execute(
        "INSERT INTO books (title, author, genre, year) VALUES (?1, ?2, ?3, ?4)",
        params![book.title(), book.author(), book.genre(), book.year()],
    )
    .context("failed to insert book")?;

    let id = conn.last_insert_rowid();
    Ok(book.into_book(id))
}

/// Delete by id. Returns whether a row was actually removed; a missing id is
/// not an error.
pub(crate) fn delete_book(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM books WHERE id = ?1", params![id])
        .context("failed to delete book")?;

    Ok(deleted > 0)
}

/// Every book in insertion order.
pub(crate) fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare("SELECT id, title, author, genre, year FROM books ORDER BY id")
        .context("failed to prepare book query")?;

    let books = stmt
        .query_map([], book_from_row)
        .context("failed to load books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect books")?;

    Ok(books)
}

/// Books whose title, author, or genre contains `query`. SQLite's `LIKE` folds
/// ASCII case only, so "orwell" matches "Orwell" but non-ASCII letters compare
/// exactly. An empty query matches every row.
pub(crate) fn search_books(conn: &Connection, query: &str) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, author, genre, year
             FROM books
             WHERE title LIKE ?1 ESCAPE '\\'
                OR author LIKE ?1 ESCAPE '\\'
                OR genre LIKE ?1 ESCAPE '\\'
             ORDER BY id",
        )
        .context("failed to prepare search query")?;

    let books = stmt
        .query_map([like_pattern(query)], book_from_row)
        .context("failed to search books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect search results")?;

    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_wrapped_in_wildcards() {
        assert_eq!(like_pattern("orwell"), "%orwell%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn metacharacters_are_escaped() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\"), "%c:\\\\%");
    }
}
