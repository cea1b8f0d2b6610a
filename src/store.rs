//! SQLite pool construction and table DDL.

use crate::config::Settings;
use crate::error::AppError;
use crate::models::{Offer, Order, Record, User};
use crate::sql::create_table;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open the pool described by `settings`.
///
/// An in-memory database only lives as long as its connection, so it gets exactly one
/// connection that is never reaped. Foreign keys are declared in the schema but not
/// enforced: deletes never cascade or block, and rows may carry dangling ids.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .foreign_keys(false);

    let pool_options = if settings.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!(url = %settings.database_url, in_memory = settings.is_in_memory(), "store connected");
    Ok(pool)
}

/// Create the user, order and offer tables if they do not exist.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    for ddl in [create_table::<User>(), create_table::<Order>(), create_table::<Offer>()] {
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::debug!(tables = ?[User::TABLE, Order::TABLE, Offer::TABLE], "tables ready");
    Ok(())
}
