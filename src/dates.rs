//! Calendar date ingestion. Seed fixtures and API writes use different formats and stay separate.

use crate::error::AppError;
use chrono::NaiveDate;

/// Format of dates in seed fixtures, e.g. `02/21/2021`.
pub const SEED_DATE_FORMAT: &str = "%m/%d/%Y";
pub const SEED_DATE_LABEL: &str = "MM/DD/YYYY";

/// Format of dates in request bodies and responses, e.g. `2021-02-21`.
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";
pub const API_DATE_LABEL: &str = "YYYY-MM-DD";

pub fn parse_seed_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    parse_with(field, value, SEED_DATE_FORMAT, SEED_DATE_LABEL)
}

pub fn parse_api_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    parse_with(field, value, API_DATE_FORMAT, API_DATE_LABEL)
}

pub fn format_api_date(date: &NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

fn parse_with(field: &str, value: &str, format: &str, label: &'static str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, format).map_err(|_| AppError::MalformedDate {
        field: field.to_string(),
        value: value.to_string(),
        expected: label,
    })
}

/// serde adapter writing `YYYY-MM-DD` for record date columns.
pub mod api_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_api_date(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, super::API_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
