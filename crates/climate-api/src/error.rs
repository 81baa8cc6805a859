use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use climate_core::error::ClimateError;
use serde::Serialize;
use thiserror::Error;

/// Wrapper that maps core errors onto HTTP responses. Handlers return this so
/// `?` on any core call produces the right status and a JSON body.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] ClimateError);

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            ClimateError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            ClimateError::Database(_) | ClimateError::MissingTable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            // Client mistakes are visible in the response; only unexpected
            // store failures belong in the server log.
            tracing::error!("request failed: {}", self.0);
        }

        let body = ErrorBody {
            error: self.0.to_string(),
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
