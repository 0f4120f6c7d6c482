//! `OpenAPI` (3.1) document for the parking service.

use std::sync::OnceLock;

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::API_KEY_HEADER;

/// `OpenAPI` documentation for the parking service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Parking Service API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Assigns, frees, and reports on numbered parking places."
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::parking::free_spaces_count,
        crate::routes::parking::occupied_spaces_list,
        crate::routes::parking::park_car,
        crate::routes::parking::free_up,
        crate::routes::parking::parking_space_logs,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::routes::parking::ParkCarRequest,
            crate::routes::parking::ParkingSpaceLogResponse,
        )
    ),
    modifiers(&ApiKeyAddon),
    tags(
        (name = "Health", description = "Liveness endpoint"),
        (name = "Parking", description = "Parking place operations"),
    ),
)]
pub struct ParkingApiDoc;

/// Registers the `X-API-Key` header scheme referenced by the parking routes.
struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}

/// Returns the generated `OpenAPI` document.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ParkingApiDoc::openapi()
}

static OPENAPI_JSON_CACHE: OnceLock<String> = OnceLock::new();

/// Returns the generated `OpenAPI` document serialized as pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn openapi_json() -> Result<String, serde_json::Error> {
    if let Some(spec) = OPENAPI_JSON_CACHE.get() {
        return Ok(spec.clone());
    }

    let spec = serde_json::to_string_pretty(&openapi())?;
    let _ = OPENAPI_JSON_CACHE.set(spec.clone());
    Ok(spec)
}
