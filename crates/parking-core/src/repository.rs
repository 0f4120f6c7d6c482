//! Record store abstraction.

use async_trait::async_trait;

use crate::error::ParkingError;
use crate::log::{NewParkingSpaceLog, ParkingSpaceLog};

/// Repository trait for parking space log records.
///
/// Implementations must reject an insert for a place that already has an
/// active record with `ParkingError::SpaceTaken`, and report I/O failures as
/// `ParkingError::StoreUnavailable`.
#[async_trait]
pub trait ParkingLogRepository: Send + Sync {
    /// Number of active records.
    async fn count_active(&self) -> Result<u64, ParkingError>;

    /// All active records, in the store's natural order.
    async fn list_active(&self) -> Result<Vec<ParkingSpaceLog>, ParkingError>;

    /// The active record occupying `place_number`, if any.
    async fn find_active_by_place(
        &self,
        place_number: u32,
    ) -> Result<Option<ParkingSpaceLog>, ParkingError>;

    /// Persists a new active record and returns it with its assigned `id`.
    async fn insert(&self, log: NewParkingSpaceLog) -> Result<ParkingSpaceLog, ParkingError>;

    /// Persists the mutable state (`is_active`, `free_up_time`) of `log`.
    async fn update(&self, log: &ParkingSpaceLog) -> Result<(), ParkingError>;

    /// Active records whose owner names match case-insensitively.
    async fn find_active_by_owner(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<ParkingSpaceLog>, ParkingError>;
}
