//! Staged statement builder
//!
//! `QueryBuilder<S>` carries the accumulated [`QueryState`] plus a zero-sized
//! stage marker. Each method consumes the builder and returns it re-typed to
//! the next legal stage, so an illegal call sequence such as `join` after
//! `where` does not type-check. No stage call can fail; every structural
//! check is deferred to `build()`.

use crate::errors::BuilderError;
use crate::sql_generation::SqlGenerator;
use crate::state::{Action, QueryState, TableInfo};
use crate::vocabulary::{Column, Connector, Operator, OrderType, Table};
use crate::DEFAULT_MAX_PAGES;
use std::marker::PhantomData;

/// `select(...)` entry stage
#[derive(Debug, Clone, Copy)]
pub struct SelectInitial;

/// Entry stage after `with_counter()`
#[derive(Debug, Clone, Copy)]
pub struct CounterInitial;

/// After `from(...)` or a completed join pair
#[derive(Debug, Clone, Copy)]
pub struct AfterFrom;

/// After `join(...)`, waiting for the joined table
#[derive(Debug, Clone, Copy)]
pub struct AfterJoin;

/// After a WHERE condition
#[derive(Debug, Clone, Copy)]
pub struct AfterWhere;

/// After `and()`/`or()`, waiting for the next condition
#[derive(Debug, Clone, Copy)]
pub struct AfterUnion;

/// After `order_by(...)`
#[derive(Debug, Clone, Copy)]
pub struct AfterOrderBy;

/// `update(...)` entry stage
#[derive(Debug, Clone, Copy)]
pub struct UpdateInitial;

/// After a SET assignment
#[derive(Debug, Clone, Copy)]
pub struct AfterSet;

/// After a WHERE condition of an UPDATE.
///
/// UPDATE takes no ORDER BY or LIMIT, so only `and()`, `or()` and `build()`
/// are reachable here:
///
/// ```compile_fail
/// use query_builder::{update, Operator};
///
/// update("users")
///     .set("age", Operator::Equal)
///     .r#where("id", Operator::Equal)
///     .limit(0, 5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UpdateWhere;

/// After `and()`/`or()` on an UPDATE, waiting for the next condition
#[derive(Debug, Clone, Copy)]
pub struct UpdateUnion;

/// After `limit(...)`; only `build()` remains
#[derive(Debug, Clone, Copy)]
pub struct Finished;

/// Statement builder typed by its current stage
#[derive(Debug, Clone)]
pub struct QueryBuilder<S> {
    state: QueryState,
    stage: PhantomData<S>,
}

/// Start a SELECT; an empty column list renders `*`
pub fn select<I, C>(columns: I) -> QueryBuilder<SelectInitial>
where
    I: IntoIterator<Item = C>,
    C: Into<Column>,
{
    let mut state = QueryState::new(Action::Select);
    state.columns = columns.into_iter().map(Into::into).collect();
    QueryBuilder::with_state(state)
}

/// Start a `SELECT *`
pub fn select_all() -> QueryBuilder<SelectInitial> {
    select(std::iter::empty::<Column>())
}

/// Start an UPDATE on `table`
pub fn update(table: impl Into<Table>) -> QueryBuilder<UpdateInitial> {
    let mut state = QueryState::new(Action::Update);
    state.table.name = table.into();
    QueryBuilder::with_state(state)
}

impl<S> QueryBuilder<S> {
    fn with_state(state: QueryState) -> Self {
        Self {
            state,
            stage: PhantomData,
        }
    }

    fn advance<N>(self) -> QueryBuilder<N> {
        QueryBuilder {
            state: self.state,
            stage: PhantomData,
        }
    }

    /// Accumulated state at this stage
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn into_state(self) -> QueryState {
        self.state
    }

    fn push_where<N>(mut self, column: Column, operator: Operator) -> QueryBuilder<N> {
        self.state.push_where(column, operator);
        self.advance()
    }

    fn join_last_where<N>(mut self, connector: Connector) -> QueryBuilder<N> {
        self.state.join_last_where(connector);
        self.advance()
    }

    fn push_set(mut self, column: Column, operator: Operator) -> QueryBuilder<AfterSet> {
        self.state.push_set(column, operator);
        self.advance()
    }

    fn paginate(mut self, offset: i64, limit: i64) -> QueryBuilder<Finished> {
        self.state.pagination.offset = offset;
        self.state.pagination.limit = limit;
        self.advance()
    }

    fn render(self) -> Result<String, BuilderError> {
        SqlGenerator::build_statement(&self.state)
    }
}

impl QueryBuilder<SelectInitial> {
    /// Prefix the column list with a `count(*)` subquery aliased `total`
    pub fn with_counter(mut self) -> QueryBuilder<CounterInitial> {
        self.state.with_counter = true;
        self.advance()
    }

    pub fn from(mut self, table: impl Into<Table>) -> QueryBuilder<AfterFrom> {
        self.state.table.name = table.into();
        self.advance()
    }
}

impl QueryBuilder<CounterInitial> {
    pub fn from(mut self, table: impl Into<Table>) -> QueryBuilder<AfterFrom> {
        self.state.table.name = table.into();
        self.advance()
    }
}

impl QueryBuilder<AfterFrom> {
    /// Register the referenced side of a join; `table` supplies the joined side
    pub fn join(mut self, table: impl Into<Table>, key: impl Into<Column>) -> QueryBuilder<AfterJoin> {
        self.state.joins.push(TableInfo::new(table, key));
        self.advance()
    }

    pub fn r#where(self, column: impl Into<Column>, operator: Operator) -> QueryBuilder<AfterWhere> {
        self.push_where(column.into(), operator)
    }

    /// Paginate; a zero `limit` is replaced by [`DEFAULT_MAX_PAGES`]
    pub fn limit(self, offset: i64, limit: i64) -> QueryBuilder<Finished> {
        let limit = if limit == 0 { DEFAULT_MAX_PAGES } else { limit };
        self.paginate(offset, limit)
    }

    pub fn build(self) -> Result<String, BuilderError> {
        self.render()
    }
}

impl QueryBuilder<AfterJoin> {
    /// Pair the pending join with the joined table and its key
    pub fn table(mut self, table: impl Into<Table>, key: impl Into<Column>) -> QueryBuilder<AfterFrom> {
        self.state.with_joins.push(TableInfo::new(table, key));
        self.advance()
    }
}

impl QueryBuilder<AfterWhere> {
    pub fn and(self) -> QueryBuilder<AfterUnion> {
        self.join_last_where(Connector::And)
    }

    pub fn or(self) -> QueryBuilder<AfterUnion> {
        self.join_last_where(Connector::Or)
    }

    pub fn order_by<I, C>(mut self, sort: OrderType, columns: I) -> QueryBuilder<AfterOrderBy>
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.state.sort.operator = Some(sort);
        self.state.sort.columns = columns.into_iter().map(Into::into).collect();
        self.advance()
    }

    /// Paginate; values pass through unchanged, zero included
    pub fn limit(self, offset: i64, limit: i64) -> QueryBuilder<Finished> {
        self.paginate(offset, limit)
    }

    pub fn build(self) -> Result<String, BuilderError> {
        self.render()
    }
}

impl QueryBuilder<AfterUnion> {
    pub fn r#where(self, column: impl Into<Column>, operator: Operator) -> QueryBuilder<AfterWhere> {
        self.push_where(column.into(), operator)
    }
}

impl QueryBuilder<AfterOrderBy> {
    /// Paginate; values pass through unchanged, zero included
    pub fn limit(self, offset: i64, limit: i64) -> QueryBuilder<Finished> {
        self.paginate(offset, limit)
    }
}

impl QueryBuilder<UpdateInitial> {
    pub fn set(self, column: impl Into<Column>, operator: Operator) -> QueryBuilder<AfterSet> {
        self.push_set(column.into(), operator)
    }
}

impl QueryBuilder<AfterSet> {
    pub fn set(self, column: impl Into<Column>, operator: Operator) -> QueryBuilder<AfterSet> {
        self.push_set(column.into(), operator)
    }

    pub fn r#where(self, column: impl Into<Column>, operator: Operator) -> QueryBuilder<UpdateWhere> {
        self.push_where(column.into(), operator)
    }
}

impl QueryBuilder<UpdateWhere> {
    pub fn and(self) -> QueryBuilder<UpdateUnion> {
        self.join_last_where(Connector::And)
    }

    pub fn or(self) -> QueryBuilder<UpdateUnion> {
        self.join_last_where(Connector::Or)
    }

    pub fn build(self) -> Result<String, BuilderError> {
        self.render()
    }
}

impl QueryBuilder<UpdateUnion> {
    pub fn r#where(self, column: impl Into<Column>, operator: Operator) -> QueryBuilder<UpdateWhere> {
        self.push_where(column.into(), operator)
    }
}

impl QueryBuilder<Finished> {
    pub fn build(self) -> Result<String, BuilderError> {
        self.render()
    }
}
