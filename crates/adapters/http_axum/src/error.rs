//! HTTP error response mapping.
//!
//! Every failure leaves the API as `{"error": "<message>"}`. Client mistakes
//! echo the domain message; server-side failures are logged here and
//! answered with a fixed text so paths and IO details stay internal.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use staple_domain::error::{NotFoundError, StapleError, ValidationError};

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Handler error wrapping [`StapleError`].
#[derive(Debug)]
pub struct ApiError(StapleError);

impl ApiError {
    /// Status code for the wrapped error: validation 400, lookup 404,
    /// anything the client cannot fix 500.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            StapleError::Validation(_) => StatusCode::BAD_REQUEST,
            StapleError::NotFound(_) => StatusCode::NOT_FOUND,
            StapleError::IdsExhausted | StapleError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        if self.status().is_server_error() {
            tracing::error!(error = ?self.0, "request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            tracing::debug!(error = %self.0, "request rejected");
            self.0.to_string()
        }
    }
}

impl From<StapleError> for ApiError {
    fn from(err: StapleError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<NotFoundError> for ApiError {
    fn from(err: NotFoundError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.message();
        (self.status(), Json(ErrorBody { error })).into_response()
    }
}
