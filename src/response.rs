//! Response helpers. Every body is `application/json; charset=utf-8`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// 200 with the value as the JSON body.
pub fn json_ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, JSON_UTF8)], Json(data)).into_response()
}

/// 201 with an empty body and a `Location` header for the new item.
pub fn created(location: String) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
