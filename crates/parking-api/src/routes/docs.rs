//! Serves the generated `OpenAPI` document.

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use tracing::error;

use crate::error::ErrorBody;
use crate::openapi::openapi_json;
use crate::state::AppState;

/// GET /docs/openapi.json
pub async fn get_openapi_json() -> Response {
    match openapi_json() {
        Ok(spec) => (StatusCode::OK, [(CONTENT_TYPE, "application/json")], spec).into_response(),
        Err(err) => {
            error!(error = %err, "failed to serialize OpenAPI document");
            let body = ErrorBody {
                error: "internal_error",
                message: format!("failed to serialize OpenAPI document: {err}"),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// Returns the documentation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/docs/openapi.json", get(get_openapi_json))
}
