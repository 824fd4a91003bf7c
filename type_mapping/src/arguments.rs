//! Ordered argument lists
//!
//! Values are kept in exactly the order their placeholders appear in the
//! rendered statement.

use crate::types::BindValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(Vec<BindValue>);

impl Arguments {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, value: impl Into<BindValue>) {
        self.0.push(value.into());
    }

    /// Repeat the first `count` values in front of the list.
    ///
    /// A counted SELECT renders its WHERE placeholders twice, subquery first.
    pub fn repeat_prefix(&self, count: usize) -> Self {
        let count = count.min(self.0.len());
        let mut values = Vec::with_capacity(self.0.len() + count);
        values.extend(self.0[..count].iter().cloned());
        values.extend(self.0.iter().cloned());
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BindValue> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[BindValue] {
        &self.0
    }

    /// `BIGINT, VARCHAR, ...` for log lines
    pub fn describe_types(&self) -> String {
        self.0
            .iter()
            .map(BindValue::type_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<Vec<BindValue>> for Arguments {
    fn from(values: Vec<BindValue>) -> Self {
        Self(values)
    }
}

impl IntoIterator for Arguments {
    type Item = BindValue;
    type IntoIter = std::vec::IntoIter<BindValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a BindValue;
    type IntoIter = std::slice::Iter<'a, BindValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
