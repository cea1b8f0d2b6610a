//! Shared application state for all routes.

use crate::config::Settings;
use crate::error::AppError;
use crate::seed::{self, SeedData};
use crate::store;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    /// Open the store, create tables and, unless disabled, load seed data.
    pub async fn init(settings: &Settings) -> Result<Self, AppError> {
        let pool = store::connect(settings).await?;
        store::ensure_tables(&pool).await?;
        if settings.seed_on_start {
            let data = match &settings.seed_path {
                Some(path) => SeedData::from_path(path).await?,
                None => SeedData::embedded()?,
            };
            seed::apply(&pool, data).await?;
        }
        Ok(AppState { pool })
    }

    /// Close every pooled connection. An in-memory store is gone afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("store closed");
    }
}
