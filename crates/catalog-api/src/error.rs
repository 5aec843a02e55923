//! Product catalog — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::error::CatalogError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Tracing or span export could not be set up.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `CatalogError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self.0 {
            CatalogError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.0.to_string()),
            CatalogError::InvalidReference(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_reference",
                self.0.to_string(),
            ),
            CatalogError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                self.0.to_string(),
            ),
            CatalogError::Query(detail) => {
                tracing::error!(error = %detail, "datastore query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "query_error",
                    "the datastore could not complete the request".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}
