//! API error rendering.

use salvo::{
    http::StatusCode,
    prelude::{Json, Response},
    writing::Scribe,
};

use appraise_app::domain::products::validation::ValidationError;

use crate::envelope::{ErrorResponse, ValidationErrorResponse, ViolationResponse};

/// Message returned for every server-side failure. Details are only logged.
pub(crate) const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned when a request body exceeds the accepted size.
pub(crate) const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Failures a handler can report to the caller.
#[derive(Debug)]
pub(crate) enum ApiError {
    /// The request payload failed validation.
    Validation(ValidationError),

    /// The request body exceeds the accepted size.
    PayloadTooLarge,

    /// Anything the caller cannot fix; already logged where it happened.
    Internal,
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        match self {
            Self::Validation(error) => {
                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Json(ValidationErrorResponse::new(
                    error.violations.into_iter().map(ViolationResponse::from).collect(),
                )));
            }
            Self::PayloadTooLarge => {
                res.status_code(StatusCode::PAYLOAD_TOO_LARGE);
                res.render(Json(ErrorResponse::new(PAYLOAD_TOO_LARGE_MESSAGE)));
            }
            Self::Internal => {
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                res.render(Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)));
            }
        }
    }
}
