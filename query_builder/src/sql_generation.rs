//! Statement rendering
//!
//! Pure functions from a [`QueryState`] to statement text, plus the
//! structural checks that run once per `build()`.

use crate::errors::BuilderError;
use crate::state::{Action, Condition, Pagination, QueryState, Sort, TableInfo};
use crate::vocabulary::{Column, Table};

pub struct SqlGenerator;

impl SqlGenerator {
    /// Render the statement for the state's action
    pub fn build_statement(state: &QueryState) -> Result<String, BuilderError> {
        let statement = match state.action {
            Action::Select => Self::select_statement(state),
            Action::Update => Ok(Self::update_statement(state)),
            Action::Insert | Action::Delete => Err(BuilderError::MissingAction),
        };

        #[cfg(feature = "debug-logging")]
        match &statement {
            Ok(sql) => tracing::debug!(action = %state.action, sql = %sql, "statement rendered"),
            Err(e) => tracing::debug!(action = %state.action, error = %e, "statement rejected"),
        }

        statement
    }

    /// Cross-field checks that cannot be enforced by the stage types
    pub fn validate_select(state: &QueryState) -> Result<(), BuilderError> {
        if state.joins.len() != state.with_joins.len() {
            return Err(BuilderError::JoinMismatch);
        }

        if state.table.name.is_empty() {
            return Err(BuilderError::MissingFromClause);
        }

        if state.sort.operator.is_some() && state.sort.columns.is_empty() {
            return Err(BuilderError::MissingOrderFields);
        }

        Ok(())
    }

    /// Render a SELECT statement
    pub fn select_statement(state: &QueryState) -> Result<String, BuilderError> {
        Self::validate_select(state)?;

        let mut sql = Self::build_select_clause(state);
        sql.push_str(&Self::build_from_clause(&state.table.name));
        sql.push_str(&Self::build_join_clause(&state.joins, &state.with_joins));
        sql.push_str(&Self::build_where_clause(&state.wheres));
        sql.push_str(&Self::build_order_clause(&state.sort));
        sql.push_str(&Self::build_limit_clause(state.pagination));
        sql.push(';');
        Ok(sql)
    }

    /// Render an UPDATE statement; sort, pagination and joins are ignored
    pub fn update_statement(state: &QueryState) -> String {
        let mut sql = format!("UPDATE {} ", state.table.name);

        if !state.sets.is_empty() {
            sql.push_str("SET ");
            sql.push_str(&Self::build_conditions(&state.sets));
        }

        sql.push_str(&Self::build_where_clause(&state.wheres));

        let mut sql = sql.trim_end().to_string();
        sql.push(';');
        sql
    }

    /// `SELECT <columns>` or the counter-wrapped variant
    pub fn build_select_clause(state: &QueryState) -> String {
        let columns = Self::build_column_list(&state.columns);

        if !state.with_counter {
            return format!("SELECT {}", columns);
        }

        // the subquery counts the full filtered set; ORDER BY and LIMIT stay outside
        let counter = format!(
            "SELECT count(*){}{}{}",
            Self::build_from_clause(&state.table.name),
            Self::build_join_clause(&state.joins, &state.with_joins),
            Self::build_where_clause(&state.wheres),
        );

        format!("SELECT {}, ({}) as total", columns, counter)
    }

    pub fn build_column_list(columns: &[Column]) -> String {
        if columns.is_empty() {
            return "*".to_string();
        }

        columns
            .iter()
            .map(Column::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn build_from_clause(table: &Table) -> String {
        format!(" FROM {}", table)
    }

    /// One `JOIN` segment per pair, `with_joins[i]` being the joined side
    pub fn build_join_clause(joins: &[TableInfo], with_joins: &[TableInfo]) -> String {
        joins
            .iter()
            .zip(with_joins)
            .map(|(join, with)| {
                format!(
                    " JOIN {} ON {}.{} = {}.{}",
                    with.name, with.name, with.key, join.name, join.key
                )
            })
            .collect()
    }

    pub fn build_where_clause(wheres: &[Condition]) -> String {
        if wheres.is_empty() {
            return String::new();
        }

        format!(" WHERE {}", Self::build_conditions(wheres))
    }

    /// ORDER BY lists the sort columns only
    pub fn build_order_clause(sort: &Sort) -> String {
        if sort.operator.is_none() {
            return String::new();
        }

        format!(" ORDER BY {}", Self::build_column_list(&sort.columns))
    }

    pub fn build_limit_clause(pagination: Pagination) -> String {
        let Pagination { offset, limit } = pagination;

        if offset >= 0 && limit >= 0 && (offset > 0 || limit > 0) {
            format!(" LIMIT {}, {}", offset, limit)
        } else {
            String::new()
        }
    }

    fn build_conditions(conditions: &[Condition]) -> String {
        conditions
            .iter()
            .map(|condition| {
                format!(
                    "{} {} ?{}",
                    condition.column,
                    condition.operator.to_sql(),
                    condition.connector.map(|c| c.to_sql()).unwrap_or_default()
                )
            })
            .collect()
    }
}
