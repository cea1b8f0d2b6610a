//! Seed fixtures loaded once at startup.
//!
//! Fixture orders carry `MM/DD/YYYY` dates, unlike API writes which use `YYYY-MM-DD`.

use crate::dates::parse_seed_date;
use crate::error::{AppError, ConfigError};
use crate::models::{Offer, OfferFields, Order, OrderFields, Record, User, UserFields};
use crate::sql::{bind_all, insert, QueryBuf};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::path::Path;

/// Default fixture compiled into the binary.
pub const EMBEDDED_SEED: &str = include_str!("../fixtures/seed.json");

#[derive(Clone, Debug, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub orders: Vec<SeedOrder>,
    #[serde(default)]
    pub offers: Vec<SeedOffer>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedUser {
    pub id: i64,
    #[serde(flatten)]
    pub fields: UserFields,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedOrder {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub address: String,
    pub price: i64,
    pub customer_id: i64,
    pub executor_id: i64,
}

impl SeedOrder {
    pub fn into_fields(self) -> Result<(i64, OrderFields), AppError> {
        let start_date = parse_seed_date("start_date", &self.start_date)?;
        let end_date = parse_seed_date("end_date", &self.end_date)?;
        Ok((
            self.id,
            OrderFields {
                name: self.name,
                description: self.description,
                start_date,
                end_date,
                address: self.address,
                price: self.price,
                customer_id: self.customer_id,
                executor_id: self.executor_id,
            },
        ))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedOffer {
    pub id: i64,
    #[serde(flatten)]
    pub fields: OfferFields,
}

/// Rows written by [`apply`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedCounts {
    pub users: usize,
    pub orders: usize,
    pub offers: usize,
}

impl SeedData {
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_json(EMBEDDED_SEED)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| AppError::Seed(format!("invalid fixture: {}", e)))
    }

    pub async fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

/// Insert every fixture row in one transaction, users then orders then offers.
/// Order dates are parsed before anything is written.
pub async fn apply(pool: &SqlitePool, data: SeedData) -> Result<SeedCounts, AppError> {
    let orders = data
        .orders
        .into_iter()
        .map(SeedOrder::into_fields)
        .collect::<Result<Vec<_>, _>>()?;

    let mut statements: Vec<QueryBuf> = Vec::new();
    let counts = SeedCounts {
        users: data.users.len(),
        orders: orders.len(),
        offers: data.offers.len(),
    };
    statements.extend(data.users.into_iter().map(|u| insert::<User>(Some(u.id), u.fields)));
    statements.extend(orders.into_iter().map(|(id, fields)| insert::<Order>(Some(id), fields)));
    statements.extend(data.offers.into_iter().map(|o| insert::<Offer>(Some(o.id), o.fields)));

    let mut tx = pool.begin().await?;
    for q in statements {
        tracing::debug!(sql = %q.sql, "seed");
        bind_all(sqlx::query(&q.sql), q.params).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(
        users = counts.users,
        orders = counts.orders,
        offers = counts.offers,
        "seeded {}, {}, {} tables",
        User::TABLE,
        Order::TABLE,
        Offer::TABLE
    );
    Ok(counts)
}
