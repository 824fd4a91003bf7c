//! User domain types

use query_builder::Column;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, age: i64) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPages {
    pub limit: i64,
    pub offset: i64,
    /// Rows matching the filters, ignoring pagination
    pub total: i64,
    pub users: Vec<User>,
}

/// Columns of the `users` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Name,
    Age,
}

impl UserField {
    /// Table order, used when no projection is given
    pub const ALL: [UserField; 3] = [UserField::Id, UserField::Name, UserField::Age];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Name => "name",
            UserField::Age => "age",
        }
    }

    pub fn column(&self) -> Column {
        Column::new(self.as_str())
    }

    pub fn from_column(column: &Column) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == column.as_str())
    }

    /// Fields to read back for a projection; empty means every column
    pub fn projected(columns: &[Column]) -> Result<Vec<Self>, Column> {
        if columns.is_empty() {
            return Ok(Self::ALL.to_vec());
        }
        columns
            .iter()
            .map(|column| Self::from_column(column).ok_or_else(|| column.clone()))
            .collect()
    }
}
