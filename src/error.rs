//! Typed failures raised before anything reaches SQLite. Storage errors stay
//! as `anyhow` chains; only the validation rules get their own variants so the
//! UI and tests can tell a rejected record apart from a broken database.

use thiserror::Error;

use crate::models::{YEAR_MAX, YEAR_MIN};

/// Reasons a book cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// Title was empty or whitespace only.
    #[error("Book title is required.")]
    MissingTitle,

    /// Author was empty or whitespace only.
    #[error("Author is required.")]
    MissingAuthor,

    /// Publication year outside the accepted window.
    #[error("Publication year {0} must be between {min} and {max}.", min = YEAR_MIN, max = YEAR_MAX)]
    YearOutOfRange(i64),
}
