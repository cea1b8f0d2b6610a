//! Request body validation against a record's field rules.

use crate::dates::parse_api_date;
use crate::error::AppError;
use crate::models::{FieldKind, FieldRule, FieldSet, PK_COLUMN};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate the whole body, then build the typed field set. Every field is required.
    pub fn parse<F: FieldSet>(body: Map<String, Value>) -> Result<F, AppError> {
        Self::validate(&body, F::RULES)?;
        serde_json::from_value(Value::Object(body)).map_err(|e| AppError::Validation(e.to_string()))
    }

    /// All rule fields present, non-null and of the right kind; no keys outside the rules.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for rule in rules {
            match body.get(rule.name) {
                None | Some(Value::Null) => {
                    return Err(AppError::Validation(format!("{} is required", rule.name)));
                }
                Some(v) => validate_field(rule, v)?,
            }
        }
        if let Some(key) = body.keys().find(|k| !rules.iter().any(|r| r.name == k.as_str())) {
            return Err(AppError::Validation(format!("unknown field {}", key)));
        }
        Ok(())
    }

    /// Remove the primary key from a body. Absent or null gives `None`; anything but an integer is rejected.
    pub fn take_id(body: &mut Map<String, Value>) -> Result<Option<i64>, AppError> {
        match body.remove(PK_COLUMN) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_i64()
                .map(Some)
                .ok_or_else(|| AppError::Validation(format!("{} must be an integer", PK_COLUMN))),
        }
    }
}

fn validate_field(rule: &FieldRule, v: &Value) -> Result<(), AppError> {
    let ok = match rule.kind {
        FieldKind::Text => v.is_string(),
        FieldKind::Integer => v.as_i64().is_some(),
        FieldKind::Date => match v.as_str() {
            Some(s) => {
                parse_api_date(rule.name, s)?;
                true
            }
            None => false,
        },
    };
    if !ok {
        return Err(AppError::Validation(format!(
            "{} must be {}",
            rule.name,
            rule.kind.describe()
        )));
    }
    Ok(())
}
