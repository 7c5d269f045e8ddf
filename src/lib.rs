//! Core library surface for the Personal Library Manager TUI application.
//!
//! The `bin` target wires these pieces together; the storage handle and the
//! models are public so scripts and tests get the same validation the UI does.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Runtime paths.
pub use config::Config;

/// The storage handle every catalog operation goes through.
pub use db::Library;

/// Domain types and their validation failures.
pub use error::BookError;
pub use models::{Book, NewBook, YEAR_MAX, YEAR_MIN};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
