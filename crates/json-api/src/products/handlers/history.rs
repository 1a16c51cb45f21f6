//! History Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};

use appraise_app::domain::products::records::ProductRecord;

use crate::{envelope::SuccessResponse, errors::ApiError, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct HistoryEntryResponse {
    pub name: String,
    pub price: f64,
    pub quality: u8,

    /// When the product was recorded (RFC 3339)
    pub created_at: String,
}

impl From<ProductRecord> for HistoryEntryResponse {
    fn from(product: ProductRecord) -> Self {
        HistoryEntryResponse {
            name: product.name,
            price: product.price,
            quality: product.quality,
            created_at: product.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct HistoryResponse {
    /// Recorded products, newest first
    pub history: Vec<HistoryEntryResponse>,

    pub count: usize,
}

/// History Handler
///
/// Returns the most recently recorded products.
#[handler]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<SuccessResponse<HistoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let history: Vec<HistoryEntryResponse> = state
        .app
        .products
        .list_history()
        .await
        .or_500("failed to fetch history")?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(SuccessResponse::new(HistoryResponse {
        count: history.len(),
        history,
    })))
}
