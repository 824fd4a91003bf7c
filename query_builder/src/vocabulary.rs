//! Clause vocabulary
//!
//! Opaque tokens the builder stitches into statement text. Identifiers are
//! taken verbatim; nothing here quotes or validates them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Table name token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table(String);

/// Column name token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Column(String);

macro_rules! string_token {
    ($name:ident) => {
        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(val: &str) -> Self {
                Self(val.to_string())
            }
        }

        impl From<String> for $name {
            fn from(val: String) -> Self {
                Self(val)
            }
        }

        impl From<&$name> for $name {
            fn from(val: &$name) -> Self {
                val.clone()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_token!(Table);
string_token!(Column);

/// Comparison operators allowed in WHERE and SET entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterEqualsThan,
    #[serde(rename = "<=")]
    LessEqualsThan,
}

impl Operator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterEqualsThan => ">=",
            Operator::LessEqualsThan => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_sql())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Asc,
    Desc,
}

impl OrderType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            OrderType::Asc => "ASC",
            OrderType::Desc => "DESC",
        }
    }
}

/// Separator stamped on an entry when another entry follows it.
///
/// WHERE conditions use `And`/`Or`; SET assignments use `Comma`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    And,
    Or,
    Comma,
}

impl Connector {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Connector::And => " AND ",
            Connector::Or => " OR ",
            Connector::Comma => ", ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_to_sql() {
        assert_eq!(Operator::Equal.to_sql(), "=");
        assert_eq!(Operator::GreaterThan.to_sql(), ">");
        assert_eq!(Operator::LessThan.to_sql(), "<");
        assert_eq!(Operator::GreaterEqualsThan.to_sql(), ">=");
        assert_eq!(Operator::LessEqualsThan.to_sql(), "<=");
    }

    #[test]
    fn test_connector_to_sql() {
        assert_eq!(Connector::And.to_sql(), " AND ");
        assert_eq!(Connector::Or.to_sql(), " OR ");
        assert_eq!(Connector::Comma.to_sql(), ", ");
    }

    #[test]
    fn test_operator_serde_uses_symbols() {
        let op: Operator = serde_json::from_str("\">=\"").unwrap();
        assert_eq!(op, Operator::GreaterEqualsThan);
        assert_eq!(serde_json::to_string(&Operator::Equal).unwrap(), "\"=\"");
    }

    #[test]
    fn test_tokens_are_transparent() {
        let column: Column = serde_json::from_str("\"users_id\"").unwrap();
        assert_eq!(column.as_str(), "users_id");
        assert_eq!(Table::from("users").to_string(), "users");
        assert!(Table::default().is_empty());
    }
}
