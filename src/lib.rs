//! # DaoKit
//!
//! A data-access toolkit for MySQL built around a staged statement builder,
//! with an in-memory backend for tests and demos and store instrumentation
//! through `tracing` and metric callbacks.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use daokit::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let users = init_data_access(StorageType::Memory, &config).await?;
//!
//!     let ctx = Context::new_background();
//!     users.create(&ctx, User::new(1, "Leonardo", 38)).await?;
//!
//!     let filters = Filters::new()
//!         .with_id(KeyOperator::equal(1))
//!         .with_name(KeyOperator::equal("Leonardo"));
//!     let pages = users.search(&ctx, filters).await?;
//!     println!("found {} user(s)", pages.total);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod client;
pub mod domain;
pub mod errors;
pub mod executor;
pub mod filters;
pub mod prelude;
pub mod rest;
pub mod statements;
pub mod users;

// Re-export the main public types for convenience
pub use client::StorageClient;
pub use domain::{User, UserField, UserPages};
pub use errors::{DaoError, ErrorCode};
pub use filters::{Filters, KeyOperator};
pub use rest::{bind_response, Headers, Request, Response};
pub use users::{init_data_access, DataAccess, StorageType, UserMemory, UserStorage};

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, MemoryConfig, MetricsConfig, QueryConfig};

// Re-export member crates used in the public API
pub use memory_store;
pub use metrics_system;
pub use query_builder;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use reqwest;
pub use sqlx;
