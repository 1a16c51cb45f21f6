//! Response envelopes shared by every endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use appraise_app::domain::products::validation::Violation;

/// Outcome tag carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Status {
    Success,
    Error,
}

/// Successful response wrapping `data`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SuccessResponse<T> {
    pub status: Status,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            status: Status::Success,
            data,
        }
    }
}

/// Generic failure with a single message.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorResponse {
    pub status: Status,
    pub message: String,
}

impl ErrorResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            status: Status::Error,
            message: message.to_string(),
        }
    }
}

/// Validation failure listing every violation.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ValidationErrorResponse {
    pub status: Status,
    pub errors: Vec<ViolationResponse>,
}

impl ValidationErrorResponse {
    pub(crate) fn new(errors: Vec<ViolationResponse>) -> Self {
        Self {
            status: Status::Error,
            errors,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ViolationResponse {
    /// Stable field identifier, e.g. `products[0].name`
    pub path: String,

    pub field: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl From<Violation> for ViolationResponse {
    fn from(violation: Violation) -> Self {
        Self {
            path: violation.path,
            field: violation.field.to_string(),
            index: violation.index,
            message: violation.message.to_string(),
            value: violation.value,
        }
    }
}
