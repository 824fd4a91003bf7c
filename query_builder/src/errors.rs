//! Error types for statement construction
//!
//! Every variant is a structural mistake in the builder chain. They are
//! raised only by `build()` and are never transient.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    #[error("join statement should be created by an equal number of tables")]
    JoinMismatch,

    #[error("from clause should provide a valid table name")]
    MissingFromClause,

    #[error("action should be select, update")]
    MissingAction,

    #[error("order by should provide valid fields")]
    MissingOrderFields,
}
