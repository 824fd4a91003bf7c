//! Error types for memory store operations

use thiserror::Error;

/// Memory store errors
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("memory data not found: {0}")]
    KeyNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
