//! Deadline wrapper for store calls.

use std::future::Future;
use std::time::Duration;

use parking_core::error::ParkingError;
use tracing::warn;

/// Awaits `call`, dropping it and failing with `StoreTimeout` once `limit`
/// elapses.
pub(crate) async fn within<T, F>(limit: Duration, call: F) -> Result<T, ParkingError>
where
    F: Future<Output = Result<T, ParkingError>>,
{
    if let Ok(result) = tokio::time::timeout(limit, call).await {
        result
    } else {
        warn!(timeout_ms = limit.as_millis(), "store call exceeded its deadline");
        Err(ParkingError::StoreTimeout(limit))
    }
}
