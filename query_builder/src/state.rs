//! Query state
//!
//! The single record a builder chain accumulates. It is created by an entry
//! point (`select`/`update`), moved through every stage and consumed by
//! `build()`.

use crate::vocabulary::{Column, Connector, Operator, OrderType, Table};
use std::fmt;

/// Statement verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Select,
    Insert,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Select => "SELECT",
            Action::Insert => "INSERT",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table name paired with the key column used in a JOIN
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableInfo {
    pub name: Table,
    pub key: Column,
}

impl TableInfo {
    pub fn new(name: impl Into<Table>, key: impl Into<Column>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// One WHERE condition or SET assignment.
///
/// `connector` is the separator rendered *after* this entry; the last entry
/// of a list keeps `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: Column,
    pub operator: Operator,
    pub connector: Option<Connector>,
}

impl Condition {
    pub fn new(column: impl Into<Column>, operator: Operator) -> Self {
        Self {
            column: column.into(),
            operator,
            connector: None,
        }
    }
}

/// ORDER BY specification; either both parts are empty or both are set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    pub operator: Option<OrderType>,
    pub columns: Vec<Column>,
}

/// Offset and limit; zero for both omits the LIMIT clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub(crate) action: Action,
    pub(crate) columns: Vec<Column>,
    pub(crate) table: TableInfo,
    pub(crate) joins: Vec<TableInfo>,
    pub(crate) with_joins: Vec<TableInfo>,
    pub(crate) sets: Vec<Condition>,
    pub(crate) wheres: Vec<Condition>,
    pub(crate) sort: Sort,
    pub(crate) pagination: Pagination,
    pub(crate) with_counter: bool,
}

impl QueryState {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            columns: Vec::new(),
            table: TableInfo::default(),
            joins: Vec::new(),
            with_joins: Vec::new(),
            sets: Vec::new(),
            wheres: Vec::new(),
            sort: Sort::default(),
            pagination: Pagination::default(),
            with_counter: false,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn table(&self) -> &Table {
        &self.table.name
    }

    pub fn wheres(&self) -> &[Condition] {
        &self.wheres
    }

    pub fn sets(&self) -> &[Condition] {
        &self.sets
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn with_counter(&self) -> bool {
        self.with_counter
    }

    /// Number of `?` placeholders the rendered statement will contain.
    ///
    /// With the counter subquery the WHERE placeholders appear twice, first
    /// inside the subquery and then in the outer statement.
    pub fn placeholder_count(&self) -> usize {
        match self.action {
            Action::Select if self.with_counter => self.wheres.len() * 2,
            Action::Select => self.wheres.len(),
            Action::Update => self.sets.len() + self.wheres.len(),
            Action::Insert | Action::Delete => 0,
        }
    }

    pub(crate) fn push_where(&mut self, column: Column, operator: Operator) {
        self.wheres.push(Condition::new(column, operator));
    }

    /// Stamp the separator on the most recent condition
    pub(crate) fn join_last_where(&mut self, connector: Connector) {
        if let Some(last) = self.wheres.last_mut() {
            last.connector = Some(connector);
        }
    }

    pub(crate) fn push_set(&mut self, column: Column, operator: Operator) {
        if let Some(previous) = self.sets.last_mut() {
            previous.connector = Some(Connector::Comma);
        }
        self.sets.push(Condition::new(column, operator));
    }
}
