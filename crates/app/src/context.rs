//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::products::{ProductsService, SqliteProductsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to prepare database schema")]
    Schema(#[source] sqlx::Error),
}

/// Services shared by every request, plus the store they run against.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    db: Option<Db>,
}

impl AppContext {
    /// Build a context around an existing service, without owning a store.
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self { products, db: None }
    }

    /// Open the store at `url`, ensure its schema, and build the services on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error when opening the database or creating the schema fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_schema(&pool)
            .await
            .map_err(AppInitError::Schema)?;

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(SqliteProductsService::new(db.clone())),
            db: Some(db),
        })
    }

    /// Release the store. Requests still holding the context will fail afterwards.
    pub async fn close(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}
