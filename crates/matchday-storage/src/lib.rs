//! Matchday Storage Layer
//!
//! SQLite-based persistence for client-side state. The session token and
//! its expiry live here so a restart does not silently lose them.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
