//! Products Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, query_as, sqlite::SqliteRow};

use crate::domain::products::{
    data::NewProduct,
    records::{ProductId, ProductRecord},
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const LIST_RECENT_PRODUCTS_SQL: &str = include_str!("sql/list_recent_products.sql");

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SqliteProductsRepository;

impl SqliteProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        pool: &SqlitePool,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.name.as_str())
            .bind(product.price)
            .bind(i64::from(product.quality))
            .fetch_one(pool)
            .await
    }

    pub(crate) async fn list_recent_products(
        &self,
        pool: &SqlitePool,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(LIST_RECENT_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .fetch_all(pool)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for ProductRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let quality_i64: i64 = row.try_get("quality")?;

        let quality = u8::try_from(quality_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quality".to_string(),
            source: Box::new(e),
        })?;

        let created_at = row
            .try_get::<String, _>("created_at")?
            .parse::<Timestamp>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "created_at".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            quality,
            created_at,
        })
    }
}
