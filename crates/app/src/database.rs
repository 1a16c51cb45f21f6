//! Database connection management

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool, query,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use tracing::info;

const CREATE_PRODUCTS_TABLE_SQL: &str = include_str!("sql/create_products_table.sql");
const CREATE_PRODUCTS_CREATED_AT_INDEX_SQL: &str =
    include_str!("sql/create_products_created_at_index.sql");

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handle to the product store.
#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection, waiting for checked-out ones to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Open (creating if missing) the `SQLite` database at `database_url`.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the database cannot be opened.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!(max_connections, "database connection established");

    Ok(pool)
}

/// Create the products table and its history index if they do not exist yet.
///
/// Safe to call on every start.
///
/// # Errors
///
/// Returns an error if a DDL statement fails.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for sql in [
        CREATE_PRODUCTS_TABLE_SQL,
        CREATE_PRODUCTS_CREATED_AT_INDEX_SQL,
    ] {
        query(sql).execute(pool).await?;
    }

    info!("products table ready");

    Ok(())
}
