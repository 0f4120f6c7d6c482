//! Shared application state.

use std::sync::{Arc, Mutex};

use parking_allocation::domain::lot::ParkingLot;
use parking_core::clock::Clock;
use parking_core::repository::ParkingLogRepository;
use parking_core::rng::DeterministicRng;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable lot settings.
    pub lot: Arc<ParkingLot>,
    /// Shared secret expected in the `X-API-Key` header.
    pub api_key: Arc<str>,
    /// Clock for deterministic time.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Process-lifetime RNG used to pick free places.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Parking log record store.
    pub parking_log_repository: Arc<dyn ParkingLogRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        lot: ParkingLot,
        api_key: impl Into<Arc<str>>,
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        parking_log_repository: Arc<dyn ParkingLogRepository>,
    ) -> Self {
        Self {
            lot: Arc::new(lot),
            api_key: api_key.into(),
            clock,
            rng,
            parking_log_repository,
        }
    }
}
