//! Record CRUD against SQLite. One statement per call.

use crate::error::AppError;
use crate::models::Record;
use crate::sql::{bind_all, delete, insert, select_all, select_by_id, update, QueryBuf};
use sqlx::SqlitePool;

pub struct CrudService;

impl CrudService {
    /// Every row, ordered by id.
    pub async fn list<R: Record>(pool: &SqlitePool) -> Result<Vec<R>, AppError> {
        let q = select_all::<R>();
        tracing::debug!(sql = %q.sql, "query");
        let rows = sqlx::query_as::<_, R>(&q.sql).fetch_all(pool).await?;
        Ok(rows)
    }

    /// Fetch one row by primary key.
    pub async fn read<R: Record>(pool: &SqlitePool, id: i64) -> Result<Option<R>, AppError> {
        let q = select_by_id::<R>(id);
        tracing::debug!(sql = %q.sql, id, "query");
        let row = sqlx::query_as::<_, R>(&q.sql).bind(id).fetch_optional(pool).await?;
        Ok(row)
    }

    /// Insert one row and return its id. A supplied id that is already taken is a conflict.
    pub async fn create<R: Record>(pool: &SqlitePool, id: Option<i64>, fields: R::Fields) -> Result<i64, AppError> {
        let q = insert::<R>(id, fields);
        let result = Self::execute(pool, q).await.map_err(|e| match e {
            AppError::Db(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                AppError::Conflict(format!("{} {} already exists", R::TABLE, id.unwrap_or_default()))
            }
            other => other,
        })?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite every mutable column of one row. `NotFound` when no row has that id.
    pub async fn update<R: Record>(pool: &SqlitePool, id: i64, fields: R::Fields) -> Result<(), AppError> {
        let result = Self::execute(pool, update::<R>(id, fields)).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {}", R::TABLE, id)));
        }
        Ok(())
    }

    /// Remove one row. Nothing that references it is touched. `NotFound` when no row has that id.
    pub async fn delete<R: Record>(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let result = Self::execute(pool, delete::<R>(id)).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {}", R::TABLE, id)));
        }
        Ok(())
    }

    async fn execute(pool: &SqlitePool, q: QueryBuf) -> Result<sqlx::sqlite::SqliteQueryResult, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let result = bind_all(sqlx::query(&q.sql), q.params).execute(pool).await?;
        Ok(result)
    }
}
