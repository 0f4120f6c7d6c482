//! Commands for the allocation context.

use parking_core::error::ParkingError;
use uuid::Uuid;

/// Command to park a vehicle in any free place.
#[derive(Debug, Clone)]
pub struct ParkVehicle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Driver first name.
    pub first_name: String,
    /// Driver last name.
    pub last_name: String,
    /// Vehicle make.
    pub car_make: String,
    /// Vehicle license plate.
    pub license_plate: String,
}

impl ParkVehicle {
    /// Checks that every field carries a non-blank value.
    ///
    /// # Errors
    ///
    /// Returns `ParkingError::InvalidInput` naming the first blank field.
    pub fn validate(&self) -> Result<(), ParkingError> {
        for (name, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("car_make", &self.car_make),
            ("license_plate", &self.license_plate),
        ] {
            if value.trim().is_empty() {
                return Err(ParkingError::InvalidInput(format!("{name} is required")));
            }
        }
        Ok(())
    }
}

/// Command to free an occupied place.
#[derive(Debug, Clone)]
pub struct ReleaseSpace {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The place to free.
    pub place_number: u32,
}
