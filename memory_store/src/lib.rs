//! In-memory key/value storage
//!
//! This crate provides the process-local storage backend used when the
//! data-access layer runs without a database.

pub mod errors;
pub mod prelude;
pub mod store;

// Re-export centralized config
pub use config::MemoryConfig;

pub use errors::MemoryError;
pub use store::{KeyValueStore, MemoryStore};
