//! Record CRUD handlers, generic over the record type: list, create, read, update, delete.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::models::{Record, PK_COLUMN};
use crate::response::{created, json_ok, no_content};
use crate::service::{CrudService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};

/// A segment that is not an integer cannot name a row.
fn parse_id<R: Record>(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(format!("{} {}", R::TABLE, id_str)))
}

pub async fn list<R: Record>(State(state): State<AppState>) -> Result<Response, AppError> {
    let rows = CrudService::list::<R>(&state.pool).await?;
    Ok(json_ok(rows))
}

pub async fn create<R: Record>(
    State(state): State<AppState>,
    JsonObject(mut body): JsonObject,
) -> Result<Response, AppError> {
    let id = RequestValidator::take_id(&mut body)?;
    let fields = RequestValidator::parse::<R::Fields>(body)?;
    let id = CrudService::create::<R>(&state.pool, id, fields).await?;
    tracing::info!(table = R::TABLE, id, "created");
    Ok(created(R::location(id)))
}

pub async fn read<R: Record>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id::<R>(&id_str)?;
    let row = CrudService::read::<R>(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", R::TABLE, id)))?;
    Ok(json_ok(row))
}

/// Wholesale update: the full field set is validated before the row is touched.
/// An `id` in the body is dropped; the path decides which row changes.
pub async fn update<R: Record>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonObject(mut body): JsonObject,
) -> Result<Response, AppError> {
    let id = parse_id::<R>(&id_str)?;
    body.remove(PK_COLUMN);
    let fields = RequestValidator::parse::<R::Fields>(body)?;
    CrudService::update::<R>(&state.pool, id, fields).await?;
    tracing::info!(table = R::TABLE, id, "updated");
    Ok(no_content())
}

pub async fn delete<R: Record>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id::<R>(&id_str)?;
    CrudService::delete::<R>(&state.pool, id).await?;
    tracing::info!(table = R::TABLE, id, "deleted");
    Ok(no_content())
}
