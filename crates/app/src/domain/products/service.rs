//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::{
    database::Db,
    domain::products::{
        data::NewProduct,
        errors::ProductsServiceError,
        records::ProductRecord,
        repository::SqliteProductsRepository,
        valuation::{self, Valuation},
    },
};

/// Maximum number of records returned by the history.
pub const HISTORY_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct SqliteProductsService {
    db: Db,
    repository: SqliteProductsRepository,
}

impl SqliteProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for SqliteProductsService {
    async fn calculate_value(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Valuation, ProductsServiceError> {
        let total_value = valuation::total_value(&products);
        let product_count = products.len();

        self.record_products(products).await?;

        Ok(Valuation {
            total_value,
            product_count,
            timestamp: Timestamp::now(),
        })
    }

    async fn record_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let attempted = products.len();
        let mut inserts = JoinSet::new();

        for product in products {
            let pool = self.db.pool().clone();
            let repository = self.repository;

            inserts.spawn(async move { repository.create_product(&pool, &product).await });
        }

        let mut recorded = Vec::with_capacity(attempted);
        let mut first_error: Option<ProductsServiceError> = None;

        // Every insert settles before the outcome is decided.
        while let Some(joined) = inserts.join_next().await {
            match joined {
                Ok(Ok(record)) => recorded.push(record),
                Ok(Err(error)) => {
                    first_error.get_or_insert(error.into());
                }
                Err(error) => {
                    first_error.get_or_insert(error.into());
                }
            }
        }

        if let Some(error) = first_error {
            warn!(
                attempted,
                recorded = recorded.len(),
                "batch insert failed; recorded products were kept"
            );

            return Err(error);
        }

        recorded.sort_by_key(|record| record.id);

        debug!(recorded = recorded.len(), "recorded products");

        Ok(recorded)
    }

    async fn list_history(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let products = self
            .repository
            .list_recent_products(self.db.pool(), HISTORY_LIMIT)
            .await?;

        Ok(products)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Values a validated batch and records every product in it.
    ///
    /// The total is computed from the whole batch whether or not recording succeeds.
    async fn calculate_value(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Valuation, ProductsServiceError>;

    /// Stores each product as an independent insert, issued concurrently.
    ///
    /// Fails with the first error once every insert has settled. Products
    /// stored before the failure stay stored.
    async fn record_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Most recently created products, newest first, at most [`HISTORY_LIMIT`].
    async fn list_history(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;
}
