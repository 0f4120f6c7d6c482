//! Parking service: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parking_core::error::ParkingError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code.
    #[schema(value_type = String, example = "no_free_space")]
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `ParkingError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub ParkingError);

impl From<ParkingError> for ApiError {
    fn from(err: ParkingError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and machine-readable code for the wrapped error.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            ParkingError::NoFreeSpace => (StatusCode::BAD_REQUEST, "no_free_space"),
            ParkingError::AlreadyFree(_) => (StatusCode::BAD_REQUEST, "already_free"),
            ParkingError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            ParkingError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ParkingError::SpaceTaken(_) | ParkingError::SpaceContended(_) => {
                (StatusCode::CONFLICT, "space_contended")
            }
            ParkingError::StoreUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "store_unavailable")
            }
            ParkingError::StoreTimeout(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_timeout"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        if self.0.is_client_error() {
            warn!(error = %self.0, code = error_code, "request rejected");
        } else {
            error!(error = %self.0, code = error_code, "request failed");
        }

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
