//! Record CRUD routes: a collection route and an item route per record type.

use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::models::{Offer, Order, Record, User};
use crate::state::AppState;
use axum::{routing::get, Router};

fn record_routes<R: Record>() -> Router<AppState> {
    Router::new()
        .route(&format!("/{}/", R::PATH), get(list::<R>).post(create::<R>))
        .route(
            &format!("/{}/:id/", R::PATH),
            get(read::<R>).put(update::<R>).delete(delete_handler::<R>),
        )
}

/// `/users/`, `/orders/`, `/offers/` and their `/{id}/` item routes.
pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .merge(record_routes::<User>())
        .merge(record_routes::<Order>())
        .merge(record_routes::<Offer>())
        .with_state(state)
}
