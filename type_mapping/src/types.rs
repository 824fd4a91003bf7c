//! Bind value definitions
//!
//! A small closed set of variants so argument lists can be checked for
//! count and order before they reach the driver.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl BindValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            BindValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            BindValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// SQL type name the value is sent as
    pub fn type_name(&self) -> &'static str {
        match self {
            BindValue::Bool(_) => "BOOLEAN",
            BindValue::Int(_) => "BIGINT",
            BindValue::Float(_) => "DOUBLE",
            BindValue::Text(_) => "VARCHAR",
        }
    }
}

/// Prints the raw value without quoting
impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindValue::Bool(v) => write!(f, "{}", v),
            BindValue::Int(v) => write!(f, "{}", v),
            BindValue::Float(v) => write!(f, "{}", v),
            BindValue::Text(v) => f.write_str(v),
        }
    }
}

macro_rules! int_into_bind_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BindValue {
                fn from(val: $ty) -> Self {
                    BindValue::Int(i64::from(val))
                }
            }
        )*
    };
}

int_into_bind_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for BindValue {
    fn from(val: f32) -> Self {
        BindValue::Float(f64::from(val))
    }
}

impl From<f64> for BindValue {
    fn from(val: f64) -> Self {
        BindValue::Float(val)
    }
}

impl From<bool> for BindValue {
    fn from(val: bool) -> Self {
        BindValue::Bool(val)
    }
}

impl From<String> for BindValue {
    fn from(val: String) -> Self {
        BindValue::Text(val)
    }
}

impl From<&str> for BindValue {
    fn from(val: &str) -> Self {
        BindValue::Text(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_unquoted() {
        assert_eq!(BindValue::from(1).to_string(), "1");
        assert_eq!(BindValue::from("Leonardo").to_string(), "Leonardo");
        assert_eq!(BindValue::from(true).to_string(), "true");
    }

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<BindValue> = serde_json::from_str(r#"[38, "Leonardo", false, 1.5]"#).unwrap();
        assert_eq!(
            values,
            vec![
                BindValue::Int(38),
                BindValue::Text("Leonardo".to_string()),
                BindValue::Bool(false),
                BindValue::Float(1.5),
            ]
        );
    }

    #[test]
    fn test_type_name() {
        assert_eq!(BindValue::from(1).type_name(), "BIGINT");
        assert_eq!(BindValue::from(1.5).type_name(), "DOUBLE");
        assert_eq!(BindValue::from("a").type_name(), "VARCHAR");
        assert_eq!(BindValue::from(false).type_name(), "BOOLEAN");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(BindValue::from(7u16).as_i64(), Some(7));
        assert_eq!(BindValue::from("x").as_i64(), None);
        assert_eq!(BindValue::from("x").as_str(), Some("x"));
    }
}
