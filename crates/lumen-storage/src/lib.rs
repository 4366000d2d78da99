//! Lumen Storage Layer
//!
//! SQLite-backed key/value settings used by the shell: feature flags and the
//! persisted tab list written before the process goes away.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
