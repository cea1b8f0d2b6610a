//! Route assembly.

mod common;
mod entity;

pub use common::common_routes;
pub use entity::entity_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Full application: record routes plus service routes, request tracing, and a body size cap.
///
/// The cap is enforced where the body is read, so an oversized body (with or without
/// `Content-Length`) surfaces as `AppError::PayloadTooLarge` with a JSON body.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(entity_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(DefaultBodyLimit::max(body_limit_bytes)),
        )
}
