//! PostgreSQL implementation of [`CardStore`] using sqlx.

use std::time::Duration;

use async_trait::async_trait;
use card_normaliser_core::constants::{CARDS_TABLE, NORMALISED_NAME_COLUMN, NORMALISED_NAME_WIDTH};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::StorageError;
use crate::traits::CardStore;

/// The run is strictly sequential, so one connection is enough.
const PG_POOL_MAX_CONNECTIONS: u32 = 1;
const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct PgCardStore {
    pool: PgPool,
}

impl PgCardStore {
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await
            .map_err(StorageError::Connect)?;
        tracing::info!("PgCardStore connected");
        Ok(Self { pool })
    }

    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Close the pool, waiting for the connection to be released.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("PgCardStore closed");
    }
}

fn add_column_sql() -> String {
    format!(
        "ALTER TABLE {CARDS_TABLE} ADD {NORMALISED_NAME_COLUMN} varchar({NORMALISED_NAME_WIDTH})"
    )
}

fn stamp_sql() -> String {
    format!("UPDATE {CARDS_TABLE} SET {NORMALISED_NAME_COLUMN} = $1 WHERE name = $2")
}

fn rename_sql() -> String {
    format!("UPDATE {CARDS_TABLE} SET name = $1 WHERE {NORMALISED_NAME_COLUMN} = $2")
}

#[async_trait]
impl CardStore for PgCardStore {
    async fn ensure_normalised_column(&self) -> Result<bool, StorageError> {
        let ddl = add_column_sql();
        match sqlx::query(&ddl).execute(&self.pool).await.map_err(StorageError::from) {
            Ok(_) => Ok(true),
            Err(e) if e.is_duplicate_column() => {
                tracing::debug!("{NORMALISED_NAME_COLUMN} already present: {e}");
                Ok(false)
            },
            Err(e) => Err(e),
        }
    }

    async fn distinct_names(&self) -> Result<Vec<String>, StorageError> {
        let sql = format!("SELECT DISTINCT name FROM {CARDS_TABLE} WHERE name IS NOT NULL");
        let names = sqlx::query_scalar::<_, String>(&sql).fetch_all(&self.pool).await?;
        Ok(names)
    }

    async fn apply_canonical_name(
        &self,
        original: &str,
        canonical: &str,
    ) -> Result<u64, StorageError> {
        let stamp = stamp_sql();
        let rename = rename_sql();

        // Rolled back on drop if either statement fails.
        let mut tx = self.pool.begin().await?;
        let stamped =
            sqlx::query(&stamp).bind(original).bind(original).execute(&mut *tx).await?;
        let renamed =
            sqlx::query(&rename).bind(canonical).bind(original).execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::debug!(
            original,
            canonical,
            stamped = stamped.rows_affected(),
            renamed = renamed.rows_affected(),
            "applied canonical name"
        );
        Ok(renamed.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_targets_normalised_name_column() {
        assert_eq!(add_column_sql(), "ALTER TABLE cards ADD normalised_name varchar(150)");
        assert_eq!(stamp_sql(), "UPDATE cards SET normalised_name = $1 WHERE name = $2");
        assert_eq!(rename_sql(), "UPDATE cards SET name = $1 WHERE normalised_name = $2");
    }
}
