//! Ratatui front-end: a sidebar menu of five views over the [`Library`]
//! handle, one key press at a time.
//!
//! [`Library`]: crate::db::Library

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
