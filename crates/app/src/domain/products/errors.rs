//! Products service errors.

use sqlx::Error;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("storage error: {0}")]
    Sql(#[from] Error),

    #[error("insert task did not complete: {0}")]
    Task(#[from] JoinError),
}
