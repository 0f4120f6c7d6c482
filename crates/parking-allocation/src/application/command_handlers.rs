//! Command handlers for the allocation context.
//!
//! Each handler receives its collaborators explicitly: the immutable lot
//! settings, a clock, the shared RNG where a choice is made, and the store.
//! Every store call is bounded by `ParkingLot::store_timeout`.

use std::sync::Mutex;

use parking_core::clock::Clock;
use parking_core::error::ParkingError;
use parking_core::log::{NewParkingSpaceLog, ParkingSpaceLog};
use parking_core::repository::ParkingLogRepository;
use parking_core::rng::DeterministicRng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::deadline::within;
use crate::domain::commands::{ParkVehicle, ReleaseSpace};
use crate::domain::lot::{ParkingLot, choose_place};

/// Handles the `ParkVehicle` command: picks a random free place and persists
/// an active record for it.
///
/// The insert is conditional on the place having no active record. If
/// another request wins the place first, the free set is re-read and a new
/// place chosen, up to `ParkingLot::park_attempts` times.
///
/// # Errors
///
/// Returns `ParkingError::InvalidInput` for blank fields,
/// `ParkingError::NoFreeSpace` when the lot is full,
/// `ParkingError::SpaceContended` when every attempt lost its race, and
/// store errors unchanged.
pub async fn handle_park_vehicle(
    command: &ParkVehicle,
    lot: &ParkingLot,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    repo: &dyn ParkingLogRepository,
) -> Result<ParkingSpaceLog, ParkingError> {
    command.validate()?;

    let mut attempt = 0;
    loop {
        attempt += 1;

        let active = within(lot.store_timeout(), repo.list_active()).await?;
        if lot.is_full(active.len()) {
            return Err(ParkingError::NoFreeSpace);
        }

        let free = lot.free_places(&active);
        let Some(place_number) = choose_place(&free, rng) else {
            return Err(ParkingError::NoFreeSpace);
        };
        debug!(place_number, free = free.len(), attempt, "selected free place");

        let new_log = NewParkingSpaceLog {
            log_id: Uuid::new_v4(),
            place_number,
            first_name: command.first_name.clone(),
            last_name: command.last_name.clone(),
            car_make: command.car_make.clone(),
            license_plate: command.license_plate.clone(),
            created_at: clock.now(),
        };

        match within(lot.store_timeout(), repo.insert(new_log)).await {
            Ok(stored) => {
                info!(
                    correlation_id = %command.correlation_id,
                    place_number = stored.place_number,
                    log_id = %stored.log_id,
                    "vehicle parked"
                );
                return Ok(stored);
            }
            Err(ParkingError::SpaceTaken(taken)) if attempt < lot.park_attempts() => {
                warn!(place_number = taken, attempt, "place taken concurrently; reselecting");
            }
            Err(ParkingError::SpaceTaken(_)) => {
                return Err(ParkingError::SpaceContended(attempt));
            }
            Err(err) => return Err(err),
        }
    }
}

/// Handles the `ReleaseSpace` command: marks the active record for the place
/// vacated and persists it.
///
/// # Errors
///
/// Returns `ParkingError::AlreadyFree` if the place has no active record,
/// and store errors unchanged.
pub async fn handle_release_space(
    command: &ReleaseSpace,
    lot: &ParkingLot,
    clock: &dyn Clock,
    repo: &dyn ParkingLogRepository,
) -> Result<ParkingSpaceLog, ParkingError> {
    let place_number = command.place_number;
    let Some(mut log) = within(lot.store_timeout(), repo.find_active_by_place(place_number)).await?
    else {
        return Err(ParkingError::AlreadyFree(place_number));
    };

    log.vacate(clock.now())?;
    within(lot.store_timeout(), repo.update(&log)).await?;

    info!(
        correlation_id = %command.correlation_id,
        place_number,
        log_id = %log.log_id,
        "parking space freed"
    );
    Ok(log)
}
