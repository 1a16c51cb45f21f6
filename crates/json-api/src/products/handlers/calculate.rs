//! Calculate Value Handler

use std::sync::Arc;

use salvo::{
    http::{ParseError, header::CONTENT_LENGTH},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use appraise_app::domain::products::{validation::validate_batch, valuation::Valuation};

use crate::{envelope::SuccessResponse, errors::ApiError, extensions::*, state::State};

/// Valuation of one submitted batch
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ValuationResponse {
    /// `Σ price × quality`, rounded to two decimal places
    pub total_value: f64,

    /// Number of products in the batch
    pub product_count: usize,

    /// When the valuation was computed (RFC 3339)
    pub timestamp: String,
}

impl From<Valuation> for ValuationResponse {
    fn from(valuation: Valuation) -> Self {
        ValuationResponse {
            total_value: valuation.total_value,
            product_count: valuation.product_count,
            timestamp: valuation.timestamp.to_string(),
        }
    }
}

/// Largest accepted request body, in bytes.
pub(crate) const MAX_BODY_BYTES: usize = 100 * 1024;

/// Reads the body as JSON.
///
/// A body that is not a JSON document yields `Value::Null`, which validation
/// reports as a missing batch. Oversized and unreadable bodies are errors.
async fn read_payload(req: &mut Request) -> Result<Value, ApiError> {
    let declared_length = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    if declared_length.is_some_and(|length| length > MAX_BODY_BYTES) {
        return Err(ApiError::PayloadTooLarge);
    }

    match req.parse_json_with_max_size::<Value>(MAX_BODY_BYTES).await {
        Ok(payload) => Ok(payload),
        Err(
            error @ (ParseError::InvalidContentType
            | ParseError::EmptyBody
            | ParseError::SerdeJson(_)),
        ) => {
            debug!("request body is not a JSON document: {error}");

            Ok(Value::Null)
        }
        Err(other) => {
            error!("failed to read request body: {other}");

            Err(ApiError::Internal)
        }
    }
}

/// Calculate Value Handler
///
/// Validates the submitted batch, values it, and records every product.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<SuccessResponse<ValuationResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let payload = read_payload(req).await?;

    let products = validate_batch(&payload)?;

    let valuation = state
        .app
        .products
        .calculate_value(products)
        .await
        .or_500("failed to calculate value")?;

    Ok(Json(SuccessResponse::new(valuation.into())))
}
