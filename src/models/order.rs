use super::{FieldRule, FieldSet, Record};
use crate::sql::BindValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(with = "crate::dates::api_date")]
    pub start_date: NaiveDate,
    #[serde(with = "crate::dates::api_date")]
    pub end_date: NaiveDate,
    pub address: String,
    pub price: i64,
    pub customer_id: i64,
    pub executor_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFields {
    pub name: String,
    pub description: String,
    #[serde(with = "crate::dates::api_date")]
    pub start_date: NaiveDate,
    #[serde(with = "crate::dates::api_date")]
    pub end_date: NaiveDate,
    pub address: String,
    pub price: i64,
    pub customer_id: i64,
    pub executor_id: i64,
}

impl FieldSet for OrderFields {
    const RULES: &'static [FieldRule] = &[
        FieldRule::text("name"),
        FieldRule::text("description"),
        FieldRule::date("start_date"),
        FieldRule::date("end_date"),
        FieldRule::text("address"),
        FieldRule::integer("price"),
        FieldRule::foreign_key("customer_id", "user"),
        FieldRule::foreign_key("executor_id", "user"),
    ];

    fn into_values(self) -> Vec<BindValue> {
        vec![
            BindValue::Text(self.name),
            BindValue::Text(self.description),
            BindValue::Date(self.start_date),
            BindValue::Date(self.end_date),
            BindValue::Text(self.address),
            BindValue::Integer(self.price),
            BindValue::Integer(self.customer_id),
            BindValue::Integer(self.executor_id),
        ]
    }
}

impl Record for Order {
    type Fields = OrderFields;

    const TABLE: &'static str = "order";
    const PATH: &'static str = "orders";
}
