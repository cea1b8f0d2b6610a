//! Entity records and their mutable field sets.
//!
//! A record is a full row (`id` plus columns) as read from the store and written to
//! clients. A field set is the columns a client supplies on create and update, in
//! column order, without the primary key.

mod offer;
mod order;
mod user;

pub use offer::{Offer, OfferFields};
pub use order::{Order, OrderFields};
pub use user::{User, UserFields};

use crate::sql::BindValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

/// Name of the primary key column shared by every table.
pub const PK_COLUMN: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    /// Calendar date, `YYYY-MM-DD` on the wire.
    Date,
}

impl FieldKind {
    pub fn sql_type(self) -> &'static str {
        match self {
            FieldKind::Text => "TEXT",
            FieldKind::Integer => "INTEGER",
            FieldKind::Date => "DATE",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Integer => "an integer",
            FieldKind::Date => "a date string",
        }
    }
}

/// One mutable column: name, kind, and the table it points at if it is a foreign key.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub references: Option<&'static str>,
}

impl FieldRule {
    pub const fn text(name: &'static str) -> Self {
        FieldRule { name, kind: FieldKind::Text, references: None }
    }

    pub const fn integer(name: &'static str) -> Self {
        FieldRule { name, kind: FieldKind::Integer, references: None }
    }

    pub const fn date(name: &'static str) -> Self {
        FieldRule { name, kind: FieldKind::Date, references: None }
    }

    pub const fn foreign_key(name: &'static str, table: &'static str) -> Self {
        FieldRule { name, kind: FieldKind::Integer, references: Some(table) }
    }
}

pub trait FieldSet: DeserializeOwned + Send + 'static {
    /// Mutable columns in table order. Bind order of [`FieldSet::into_values`] follows it.
    const RULES: &'static [FieldRule];

    fn into_values(self) -> Vec<BindValue>;
}

pub trait Record: Serialize + for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    type Fields: FieldSet;

    const TABLE: &'static str;
    /// Collection path segment, e.g. `users`.
    const PATH: &'static str;

    fn location(id: i64) -> String {
        format!("/{}/{}/", Self::PATH, id)
    }
}
