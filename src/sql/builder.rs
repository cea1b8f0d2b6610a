//! Builds parameterized SELECT, INSERT, UPDATE, DELETE and CREATE TABLE for a record type.

use super::BindValue;
use crate::models::{FieldRule, FieldSet, Record, PK_COLUMN};

/// Quote identifier for SQLite. `order` and `user` are keywords, so every identifier is quoted.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new(sql: String) -> Self {
        QueryBuf { sql, params: Vec::new() }
    }
}

fn rules<R: Record>() -> &'static [FieldRule] {
    <R::Fields as FieldSet>::RULES
}

/// `"id", "col1", "col2", ...`
fn select_column_list<R: Record>() -> String {
    std::iter::once(PK_COLUMN)
        .chain(rules::<R>().iter().map(|r| r.name))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row ordered by primary key.
pub fn select_all<R: Record>() -> QueryBuf {
    QueryBuf::new(format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list::<R>(),
        quoted(R::TABLE),
        quoted(PK_COLUMN)
    ))
}

pub fn select_by_id<R: Record>(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "SELECT {} FROM {} WHERE {} = ?",
        select_column_list::<R>(),
        quoted(R::TABLE),
        quoted(PK_COLUMN)
    ));
    q.params.push(BindValue::Integer(id));
    q
}

/// INSERT one row. The primary key is only listed when supplied; otherwise SQLite assigns it.
pub fn insert<R: Record>(id: Option<i64>, fields: R::Fields) -> QueryBuf {
    let mut cols: Vec<String> = Vec::new();
    let mut params: Vec<BindValue> = Vec::new();
    if let Some(id) = id {
        cols.push(quoted(PK_COLUMN));
        params.push(BindValue::Integer(id));
    }
    cols.extend(rules::<R>().iter().map(|r| quoted(r.name)));
    params.extend(fields.into_values());
    let placeholders = vec!["?"; cols.len()].join(", ");
    QueryBuf {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quoted(R::TABLE),
            cols.join(", "),
            placeholders
        ),
        params,
    }
}

/// UPDATE every mutable column of one row.
pub fn update<R: Record>(id: i64, fields: R::Fields) -> QueryBuf {
    let set = rules::<R>()
        .iter()
        .map(|r| format!("{} = ?", quoted(r.name)))
        .collect::<Vec<_>>()
        .join(", ");
    let mut params = fields.into_values();
    params.push(BindValue::Integer(id));
    QueryBuf {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = ?",
            quoted(R::TABLE),
            set,
            quoted(PK_COLUMN)
        ),
        params,
    }
}

pub fn delete<R: Record>(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(R::TABLE),
        quoted(PK_COLUMN)
    ));
    q.params.push(BindValue::Integer(id));
    q
}

/// CREATE TABLE IF NOT EXISTS with an integer primary key. Foreign keys are declared, not cascaded.
pub fn create_table<R: Record>() -> String {
    let mut defs = vec![format!("{} INTEGER PRIMARY KEY", quoted(PK_COLUMN))];
    for r in rules::<R>() {
        let mut def = format!("{} {} NOT NULL", quoted(r.name), r.kind.sql_type());
        if let Some(table) = r.references {
            def.push_str(&format!(" REFERENCES {} ({})", quoted(table), quoted(PK_COLUMN)));
        }
        defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quoted(R::TABLE),
        defs.join(", ")
    )
}
