//! Request body as a JSON object, whatever the request `Content-Type`.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde_json::{Map, Value};

/// Extractor for a JSON object body. Unreadable bodies are `BadRequest` (or `PayloadTooLarge`); anything that
/// is not a JSON object is a `Validation` error.
#[derive(Clone, Debug)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge(e.body_text())
                } else {
                    AppError::BadRequest(e.body_text())
                }
            })?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Validation(format!("body is not valid JSON: {}", e)))?;
        match value {
            Value::Object(m) => Ok(JsonObject(m)),
            _ => Err(AppError::Validation("body must be a JSON object".into())),
        }
    }
}
