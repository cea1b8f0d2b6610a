use super::{FieldRule, FieldSet, Record};
use crate::sql::BindValue;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Offer {
    pub id: i64,
    pub order_id: i64,
    pub executor_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferFields {
    pub order_id: i64,
    pub executor_id: i64,
}

impl FieldSet for OfferFields {
    const RULES: &'static [FieldRule] = &[
        FieldRule::foreign_key("order_id", "order"),
        FieldRule::foreign_key("executor_id", "user"),
    ];

    fn into_values(self) -> Vec<BindValue> {
        vec![BindValue::Integer(self.order_id), BindValue::Integer(self.executor_id)]
    }
}

impl Record for Offer {
    type Fields = OfferFields;

    const TABLE: &'static str = "offer";
    const PATH: &'static str = "offers";
}
