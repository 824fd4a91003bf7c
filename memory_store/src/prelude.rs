//! Convenience re-exports for common memory-store usage

pub use crate::errors::MemoryError;
pub use crate::store::{KeyValueStore, MemoryStore};

// Re-export centralized config
pub use config::MemoryConfig;

// Common external dependencies
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json;
pub use tokio;
