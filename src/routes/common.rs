//! Service routes outside the record API: liveness, readiness, build info.

use crate::models::{Offer, Order, Record, User};
use crate::response::json_ok;
use crate::sql::quoted;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

async fn health() -> Response {
    json_ok(serde_json::json!({ "status": "ok" }))
}

/// Ready when every record table answers a query.
async fn ready(State(state): State<AppState>) -> Response {
    match ping(&state.pool).await {
        Ok(()) => json_ok(ReadyBody {
            status: "ok",
            database: "ok",
        }),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            let mut resp = json_ok(ReadyBody {
                status: "degraded",
                database: "unavailable",
            });
            *resp.status_mut() = StatusCode::SERVICE_UNAVAILABLE;
            resp
        }
    }
}

async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for table in [User::TABLE, Order::TABLE, Offer::TABLE] {
        sqlx::query(&format!("SELECT 1 FROM {} LIMIT 1", quoted(table)))
            .fetch_optional(pool)
            .await?;
    }
    Ok(())
}

async fn version() -> Response {
    json_ok(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, GET /ready, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
