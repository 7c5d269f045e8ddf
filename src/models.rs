//! Domain models that mirror the `books` table. `Book` is what comes back out
//! of SQLite; `NewBook` is the validated shape that is allowed to go in.

use std::fmt;

use crate::error::BookError;

/// Earliest publication year the catalog accepts.
pub const YEAR_MIN: i64 = 1900;
/// Latest publication year the catalog accepts.
pub const YEAR_MAX: i64 = 2025;

/// One stored catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Primary key assigned by SQLite. Never reused, even after removal.
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Free text, may be empty.
    pub genre: String,
    /// `None` for rows whose year column is NULL; storage does not enforce it.
    pub year: Option<i64>,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.author)
    }
}

/// A book that passed validation and can be inserted. The fields are kept
/// private so the only way to get one is through [`NewBook::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    title: String,
    author: String,
    genre: String,
    year: i64,
}

impl NewBook {
    /// Check the required fields and the year window. Values are kept exactly
    /// as given; blank detection ignores surrounding whitespace but nothing is
    /// trimmed before storage.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        year: i64,
    ) -> Result<Self, BookError> {
        let title = title.into();
        let author = author.into();

        if title.trim().is_empty() {
            return Err(BookError::MissingTitle);
        }
        if author.trim().is_empty() {
            return Err(BookError::MissingAuthor);
        }
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(BookError::YearOutOfRange(year));
        }

        Ok(Self {
            title,
            author,
            genre: genre.into(),
            year,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    /// Attach the id SQLite assigned on insert.
    pub(crate) fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            genre: self.genre,
            year: Some(self.year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_empty_genre_and_boundary_years() {
        assert!(NewBook::new("Dune", "Frank Herbert", "", YEAR_MIN).is_ok());
        assert!(NewBook::new("Dune", "Frank Herbert", "", YEAR_MAX).is_ok());
    }

    #[test]
    fn rejects_blank_required_fields() {
        assert_eq!(
            NewBook::new("", "Frank Herbert", "Sci-Fi", 1965),
            Err(BookError::MissingTitle)
        );
        assert_eq!(
            NewBook::new("Dune", "   ", "Sci-Fi", 1965),
            Err(BookError::MissingAuthor)
        );
    }

    #[test]
    fn rejects_years_outside_window() {
        assert_eq!(
            NewBook::new("Beowulf", "Unknown", "Epic", 1000),
            Err(BookError::YearOutOfRange(1000))
        );
        assert_eq!(
            NewBook::new("Future", "Someone", "", YEAR_MAX + 1),
            Err(BookError::YearOutOfRange(YEAR_MAX + 1))
        );
    }

    #[test]
    fn keeps_values_verbatim() {
        let book = NewBook::new("  Dune ", "Frank Herbert", " Sci-Fi", 1965).unwrap();
        assert_eq!(book.title(), "  Dune ");
        assert_eq!(book.genre(), " Sci-Fi");
        let stored = book.into_book(7);
        assert_eq!(stored.id, 7);
        assert_eq!(stored.to_string(), "  Dune  by Frank Herbert");
    }
}
