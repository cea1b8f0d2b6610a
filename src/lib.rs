//! Marketplace API: CRUD REST backend for users, orders and offers on SQLite.

pub mod config;
pub mod dates;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use models::{Offer, OfferFields, Order, OrderFields, Record, User, UserFields};
pub use routes::{app, common_routes, entity_routes};
pub use seed::SeedData;
pub use service::{CrudService, RequestValidator};
pub use state::AppState;
