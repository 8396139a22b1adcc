//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use verdant_domain::error::VerdantError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`VerdantError`] to an HTTP response with appropriate status code.
pub struct ApiError(VerdantError);

impl From<VerdantError> for ApiError {
    fn from(err: VerdantError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            VerdantError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            VerdantError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            VerdantError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            VerdantError::Bus(err) => {
                tracing::error!(error = %err, "bus error");
                (
                    StatusCode::BAD_GATEWAY,
                    "message bus unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
