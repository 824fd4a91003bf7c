//! Instrumented statement execution
//!
//! Each call checks the placeholder count against the arguments, then runs
//! inside a database store segment labelled with the statement's action and
//! the table it touches.

use metrics_system::{start_store_segment, Context, Segment};
use query_builder::Action;
use sqlx::mysql::{MySqlQueryResult, MySqlRow};
use sqlx::{MySql, Transaction};
use type_mapping::Arguments;

use crate::client::{bind_arguments, StorageClient};
use crate::errors::DaoError;
use crate::statements::check_bindings;

fn store_segment(action: Action, resource: &str) -> Segment {
    Segment::store(action.as_str(), resource)
}

/// Run a SELECT and return its rows
pub async fn exec_query(
    ctx: &Context,
    client: &StorageClient,
    resource: &str,
    sql: &str,
    args: &Arguments,
) -> Result<Vec<MySqlRow>, DaoError> {
    check_bindings(sql, args)?;
    crate::trace_log!(sql = %sql, types = %args.describe_types(), "exec query");

    let rows = start_store_segment(
        ctx,
        store_segment(Action::Select, resource),
        client.query(sql, args),
    )
    .await?;
    Ok(rows)
}

/// Run a SELECT expected to match at most one row
pub async fn exec_query_row(
    ctx: &Context,
    client: &StorageClient,
    resource: &str,
    sql: &str,
    args: &Arguments,
) -> Result<Option<MySqlRow>, DaoError> {
    check_bindings(sql, args)?;
    crate::trace_log!(sql = %sql, types = %args.describe_types(), "exec query row");

    let row = start_store_segment(
        ctx,
        store_segment(Action::Select, resource),
        client.query_row(sql, args),
    )
    .await?;
    Ok(row)
}

/// Run a modifying statement on the pool
pub async fn exec_statement(
    ctx: &Context,
    client: &StorageClient,
    action: Action,
    resource: &str,
    sql: &str,
    args: &Arguments,
) -> Result<MySqlQueryResult, DaoError> {
    check_bindings(sql, args)?;
    crate::trace_log!(action = %action, sql = %sql, "exec statement");

    let result = start_store_segment(
        ctx,
        store_segment(action, resource),
        client.exec(sql, args),
    )
    .await?;
    Ok(result)
}

/// Run a modifying statement inside an open transaction
pub async fn exec_statement_with_tx(
    ctx: &Context,
    action: Action,
    tx: &mut Transaction<'_, MySql>,
    resource: &str,
    sql: &str,
    args: &Arguments,
) -> Result<MySqlQueryResult, DaoError> {
    check_bindings(sql, args)?;
    crate::trace_log!(action = %action, sql = %sql, "exec statement in transaction");

    let result = start_store_segment(
        ctx,
        store_segment(action, resource),
        bind_arguments(sqlx::query(sql), args).execute(&mut **tx),
    )
    .await?;
    Ok(result)
}
