use super::{FieldRule, FieldSet, Record};
use crate::sql::BindValue;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub email: String,
    pub role: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub email: String,
    pub role: String,
    pub phone: String,
}

impl FieldSet for UserFields {
    const RULES: &'static [FieldRule] = &[
        FieldRule::text("first_name"),
        FieldRule::text("last_name"),
        FieldRule::integer("age"),
        FieldRule::text("email"),
        FieldRule::text("role"),
        FieldRule::text("phone"),
    ];

    fn into_values(self) -> Vec<BindValue> {
        vec![
            BindValue::Text(self.first_name),
            BindValue::Text(self.last_name),
            BindValue::Integer(self.age),
            BindValue::Text(self.email),
            BindValue::Text(self.role),
            BindValue::Text(self.phone),
        ]
    }
}

impl Record for User {
    type Fields = UserFields;

    const TABLE: &'static str = "user";
    const PATH: &'static str = "users";
}
