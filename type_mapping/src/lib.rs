//! Bind values passed alongside builder-rendered statements
//!
//! The statement builder only renders `?` placeholders; this crate defines the
//! typed values the data-access layer binds to them, in placeholder order.

pub mod arguments;
pub mod types;

pub use arguments::Arguments;
pub use types::BindValue;
