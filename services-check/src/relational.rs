//! Relational store probe.
//!
//! The harness only needs two things from the application database: that the
//! schema can be created, and that a connection answers a trivial query.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, instrument};

use crate::CheckError;

/// How long to wait for a pooled connection before giving up.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Tables the application expects to exist.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        email VARCHAR(255) NOT NULL UNIQUE,
        name VARCHAR(255),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
];

/// Minimal interface the relational check runs against.
#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Create any missing tables.
    async fn ensure_schema(&self) -> Result<(), CheckError>;

    /// Round-trip `SELECT 1`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(1))` - If the query returned a row
    /// * `Ok(None)` - If the query succeeded without a row
    /// * `Err(CheckError)` - If no connection could be made or the query failed
    async fn ping(&self) -> Result<Option<i32>, CheckError>;
}

/// PostgreSQL store backed by an `sqlx` pool.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Build a pool for `database_url` without opening a connection.
    ///
    /// Only a malformed URL fails here; an unreachable server surfaces on the
    /// first query.
    pub fn connect_lazy(database_url: &str) -> Result<Self, CheckError> {
        Self::connect_lazy_with_timeout(database_url, DEFAULT_ACQUIRE_TIMEOUT)
    }

    pub fn connect_lazy_with_timeout(
        database_url: &str,
        acquire_timeout: Duration,
    ) -> Result<Self, CheckError> {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl RelationalStore for PostgresStore {
    #[instrument(skip(self))]
    async fn ensure_schema(&self) -> Result<(), CheckError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!(tables = SCHEMA.len(), "Schema ensured");
        Ok(())
    }

    async fn ping(&self) -> Result<Option<i32>, CheckError> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }
}
