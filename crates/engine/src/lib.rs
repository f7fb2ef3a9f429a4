//! Taleforge Engine library.
//!
//! Server-side encounter tracking for the GM assistant.
//!
//! ## Structure
//!
//! - `use_cases/` - One use case per encounter operation
//! - `infrastructure/` - Port traits and their adapters (SQLite, in-memory)
//! - `api/` - Tool dispatch and HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Shared helpers for engine tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
