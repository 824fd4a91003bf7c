//! Convenience re-exports for common DaoKit usage
//!
//! ```rust
//! use daokit::prelude::*;
//! ```

// Data access
pub use crate::domain::{User, UserField, UserPages};
pub use crate::errors::{DaoError, ErrorCode};
pub use crate::filters::{Filters, KeyOperator};
pub use crate::rest::{bind_response, Headers, Request, Response};
pub use crate::statements::{check_bindings, search_statement, update_statement};
pub use crate::users::{init_data_access, DataAccess, StorageType, UserMemory, UserStorage};
pub use crate::StorageClient;

// Centralized config
pub use config::{AppConfig, DatabaseConfig, MemoryConfig, MetricsConfig, QueryConfig};

// Statement builder
pub use query_builder::{
    select, select_all, update, Action, BuilderError, Column, Operator, OrderType, Table,
};

// Bind values
pub use type_mapping::{Arguments, BindValue};

// Instrumentation
pub use metrics_system::prelude::*;

// Memory backend
pub use memory_store::{MemoryError, MemoryStore};

// Common external dependencies
pub use anyhow;
pub use async_trait::async_trait;
pub use sqlx;
pub use tokio;
pub use uuid::Uuid;
