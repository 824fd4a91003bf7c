//! Query Builder - staged SQL statement construction for DaoKit
//!
//! This crate assembles parameterized SQL text (SELECT, SELECT with a row
//! counter, UPDATE) from typed fragments. It never sees bound values: every
//! condition renders a `?` placeholder and the caller supplies the values in
//! the same order the conditions were appended.
//!
//! ```rust
//! use query_builder::{select, Operator};
//!
//! let sql = select(["id", "name"])
//!     .from("users")
//!     .r#where("name", Operator::Equal)
//!     .and()
//!     .r#where("age", Operator::GreaterThan)
//!     .build()?;
//!
//! assert_eq!(sql, "SELECT id, name FROM users WHERE name = ? AND age > ?;");
//! # Ok::<(), query_builder::BuilderError>(())
//! ```

pub mod builder;
pub mod errors;
pub mod sql_generation;
pub mod state;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use builder::{select, select_all, update, QueryBuilder};
pub use errors::BuilderError;
pub use state::{Action, Condition, Pagination, QueryState, Sort, TableInfo};
pub use vocabulary::{Column, Connector, Operator, OrderType, Table};

/// Limit applied by the post-`FROM` `limit` stage when the caller passes zero
pub const DEFAULT_MAX_PAGES: i64 = 10;
