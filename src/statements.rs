//! Statement assembly for the `users` table
//!
//! Pure functions pairing builder-rendered SQL with its argument list. Nothing
//! here touches a connection, so every statement the MySQL backend runs can
//! be checked without one.

use crate::domain::{User, UserField};
use crate::errors::{DaoError, ErrorCode};
use crate::filters::Filters;
use query_builder::{select, update, Operator, Table};
use type_mapping::{Arguments, BindValue};

pub const USERS_TABLE: &str = "users";

pub const INSERT_USER: &str = "INSERT INTO users (id, name, age) VALUES (?, ?, ?);";

pub fn users_table() -> Table {
    Table::new(USERS_TABLE)
}

/// Page size actually requested; zero falls back to `default_page_size`
pub fn page_size(filters: &Filters, default_page_size: i64) -> i64 {
    if filters.limit > 0 {
        filters.limit
    } else {
        default_page_size
    }
}

/// Paged SELECT with a `total` count column.
///
/// The count subquery repeats the WHERE clause, so the argument list is
/// repeated once in front of itself.
pub fn search_statement(
    filters: &Filters,
    default_page_size: i64,
) -> Result<(String, Arguments), DaoError> {
    let (conditions, args) = filters.projections();
    let limit = page_size(filters, default_page_size);

    let query = select(filters.fields.iter()).with_counter().from(users_table());

    let mut conditions = conditions.into_iter();
    let query = match conditions.next() {
        None => query.limit(filters.offset, limit),
        Some((column, op)) => {
            let mut query = query.r#where(column, op);
            for (column, op) in conditions {
                query = query.and().r#where(column, op);
            }
            query.limit(filters.offset, limit)
        }
    };

    let sql = query.build()?;
    let args = args.repeat_prefix(args.len());
    check_bindings(&sql, &args)?;
    Ok((sql, args))
}

/// UPDATE of the supplied fields, keyed by id.
///
/// Empty names and non-positive ages count as not supplied.
pub fn update_statement(user: &User) -> Result<(String, Arguments), DaoError> {
    if user.id <= 0 {
        return Err(DaoError::errorf(
            ErrorCode::ClientSide,
            format!("invalid user id {}", user.id),
        ));
    }

    let mut sets: Vec<(UserField, BindValue)> = Vec::new();
    if !user.name.is_empty() {
        sets.push((UserField::Name, BindValue::from(user.name.as_str())));
    }
    if user.age > 0 {
        sets.push((UserField::Age, BindValue::from(user.age)));
    }

    let mut args = Arguments::new();
    let mut sets = sets.into_iter();
    let Some((field, value)) = sets.next() else {
        return Err(DaoError::errorf(
            ErrorCode::Unprocessable,
            format!("nothing to update for user {}", user.id),
        ));
    };

    let mut query = update(users_table()).set(field.column(), Operator::Equal);
    args.push(value);
    for (field, value) in sets {
        query = query.set(field.column(), Operator::Equal);
        args.push(value);
    }

    let sql = query
        .r#where(UserField::Id.column(), Operator::Equal)
        .build()?;
    args.push(user.id);

    check_bindings(&sql, &args)?;
    Ok((sql, args))
}

pub fn insert_statement(user: &User) -> (String, Arguments) {
    let mut args = Arguments::new();
    args.push(user.id);
    args.push(user.name.as_str());
    args.push(user.age);
    (INSERT_USER.to_string(), args)
}

/// Fail when the number of `?` differs from the number of arguments
pub fn check_bindings(sql: &str, args: &Arguments) -> Result<(), DaoError> {
    let placeholders = sql.matches('?').count();
    if placeholders != args.len() {
        return Err(DaoError::BindingMismatch {
            placeholders,
            arguments: args.len(),
            types: args.describe_types(),
        });
    }
    Ok(())
}
