//! Database connection management

use std::time::Duration;

use sqlx::{
    PgPool, Postgres, Row, Transaction,
    postgres::{PgPoolOptions, PgRow},
    query,
};
use uuid::Uuid;

/// SQL used to serialize writes against a single bookable resource.
pub const LOCK_RESOURCE_SQL: &str = "SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a plain transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a transaction holding the advisory lock for `resource`.
    ///
    /// The lock is released when the transaction commits or rolls back, so
    /// every overlap check and write performed through the returned
    /// transaction is serialized against other writers for the same resource.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or taking the lock fails.
    pub async fn begin_resource_transaction(
        &self,
        resource: Uuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(LOCK_RESOURCE_SQL)
            .bind(resource.to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }

    /// Underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Pool sizing for the server process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLimits {
    /// Upper bound on open connections.
    pub max_connections: u32,

    /// How long a request waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolLimits {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Connect to `PostgreSQL` with default [`PoolLimits`].
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect_with(database_url, PoolLimits::default()).await
}

/// Connect to `PostgreSQL` with explicit pool limits.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(database_url: &str, limits: PoolLimits) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(limits.max_connections)
        .acquire_timeout(limits.acquire_timeout)
        .connect(database_url)
        .await
}

/// Convert an unsigned amount into its `bigint` column representation.
pub(crate) fn amount_to_i64(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|error| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(error),
    })
}

/// Read a non-negative `bigint` column.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|error| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(error),
    })
}

/// Read a non-negative `integer` column.
pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let count_i32: i32 = row.try_get(col)?;

    u32::try_from(count_i32).map_err(|error| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(error),
    })
}

/// Convert an unsigned count into its `integer` column representation.
pub(crate) fn count_to_i32(count: u32, col: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(count).map_err(|error| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(error),
    })
}
