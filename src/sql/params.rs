//! Values bound into SQLite statements.

use chrono::NaiveDate;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// A column value produced from a validated field set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    Integer(i64),
    Text(String),
    Date(NaiveDate),
}

/// Bind each value in order onto the statement's positional parameters.
pub fn bind_all<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    values: Vec<BindValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for v in values {
        query = match v {
            BindValue::Integer(n) => query.bind(n),
            BindValue::Text(s) => query.bind(s),
            BindValue::Date(d) => query.bind(d),
        };
    }
    query
}
