//! Shared-secret authentication for the `/parking` routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use parking_core::error::ParkingError;
use sha2::{Digest, Sha256};

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Rejects the request with 401 unless `X-API-Key` equals the configured
/// secret.
///
/// # Errors
///
/// Returns `ParkingError::Unauthorized` when the header is absent, not
/// valid UTF-8, or does not match.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if keys_match(key, &state.api_key) => Ok(next.run(request).await),
        _ => Err(ParkingError::Unauthorized.into()),
    }
}

/// Compares fixed-length digests so timing does not depend on where the
/// keys first differ.
fn keys_match(presented: &str, expected: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    presented
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
