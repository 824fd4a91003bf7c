//! Search filters and their projection onto builder conditions
//!
//! Conditions and bound values come out of [`Filters::projections`] in the
//! same fixed field order (id, name, age), so the n-th `?` of the WHERE
//! clause always meets the n-th argument.

use crate::domain::UserField;
use query_builder::{Column, Operator};
use serde::{Deserialize, Serialize};
use type_mapping::{Arguments, BindValue};

/// Operator and value for one filterable field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyOperator {
    pub op: Option<Operator>,
    pub value: Option<BindValue>,
}

impl KeyOperator {
    pub fn new(op: Operator, value: impl Into<BindValue>) -> Self {
        Self {
            op: Some(op),
            value: Some(value.into()),
        }
    }

    pub fn equal(value: impl Into<BindValue>) -> Self {
        Self::new(Operator::Equal, value)
    }

    /// Both an operator and a value were supplied
    pub fn has_value(&self) -> bool {
        self.op.is_some() && self.value.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// Projected columns; empty selects every column
    pub fields: Vec<Column>,
    pub id: KeyOperator,
    pub name: KeyOperator,
    pub age: KeyOperator,
    pub offset: i64,
    pub limit: i64,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields<I, C>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_id(mut self, key: KeyOperator) -> Self {
        self.id = key;
        self
    }

    pub fn with_name(mut self, key: KeyOperator) -> Self {
        self.name = key;
        self
    }

    pub fn with_age(mut self, key: KeyOperator) -> Self {
        self.age = key;
        self
    }

    pub fn with_page(mut self, offset: i64, limit: i64) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Where-conditions and their values, in matching order
    pub fn projections(&self) -> (Vec<(Column, Operator)>, Arguments) {
        let mut conditions = Vec::new();
        let mut args = Arguments::new();

        let keyed = [
            (UserField::Id, &self.id),
            (UserField::Name, &self.name),
            (UserField::Age, &self.age),
        ];
        for (field, key) in keyed {
            if let (Some(op), Some(value)) = (key.op, &key.value) {
                conditions.push((field.column(), op));
                args.push(value.clone());
            }
        }

        (conditions, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_operator_needs_op_and_value() {
        assert!(KeyOperator::equal(1).has_value());
        assert!(!KeyOperator::default().has_value());

        let no_op = KeyOperator {
            op: None,
            value: Some(BindValue::from(1)),
        };
        assert!(!no_op.has_value());
    }

    #[test]
    fn test_projections_follow_field_order() {
        let filters = Filters::new()
            .with_age(KeyOperator::new(Operator::GreaterThan, 30))
            .with_id(KeyOperator::equal(1))
            .with_name(KeyOperator::equal("Leonardo"));

        let (conditions, args) = filters.projections();

        assert_eq!(
            conditions,
            vec![
                (Column::from("id"), Operator::Equal),
                (Column::from("name"), Operator::Equal),
                (Column::from("age"), Operator::GreaterThan),
            ]
        );
        assert_eq!(
            args.as_slice(),
            &[
                BindValue::Int(1),
                BindValue::Text("Leonardo".to_string()),
                BindValue::Int(30),
            ]
        );
    }

    #[test]
    fn test_projections_skip_unset_fields() {
        let filters = Filters::new().with_name(KeyOperator::equal("Leonardo"));
        let (conditions, args) = filters.projections();

        assert_eq!(conditions, vec![(Column::from("name"), Operator::Equal)]);
        assert_eq!(args.len(), 1);
    }
}
