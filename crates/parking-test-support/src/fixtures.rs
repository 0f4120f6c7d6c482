//! Record builders shared across test suites.

use chrono::{DateTime, TimeZone, Utc};
use parking_core::log::{NewParkingSpaceLog, ParkingSpaceLog};
use uuid::Uuid;

/// Fixed timestamp used across tests.
///
/// # Panics
///
/// Never; the literal date is valid.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// An unsaved record for `place_number` owned by the given driver.
#[must_use]
pub fn new_log(place_number: u32, first_name: &str, last_name: &str) -> NewParkingSpaceLog {
    NewParkingSpaceLog {
        log_id: Uuid::new_v4(),
        place_number,
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        car_make: "Toyota".to_owned(),
        license_plate: "A123BC777".to_owned(),
        created_at: fixed_now(),
    }
}

/// An active record with the given store id.
#[must_use]
pub fn active_log(id: i64, place_number: u32, first_name: &str, last_name: &str) -> ParkingSpaceLog {
    new_log(place_number, first_name, last_name).into_log(id)
}
