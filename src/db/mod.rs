//! Persistence module split across logical submodules: connection handling,
//! the `books` statements, and the [`Library`] handle that ties them together.

mod books;
mod connection;
mod library;

pub use library::Library;
