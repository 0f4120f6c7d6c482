//! Parking space log record.
//!
//! One record covers a single occupancy of a single place: it is created
//! active when a vehicle parks and flipped inactive exactly once when the
//! place is freed. Records are never deleted.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ParkingError;

/// A persisted occupancy record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSpaceLog {
    /// Store-assigned identifier.
    pub id: i64,
    /// Client-visible correlation token.
    pub log_id: Uuid,
    /// Occupied place, in `1..=total_slots`.
    pub place_number: u32,
    /// Driver first name.
    pub first_name: String,
    /// Driver last name.
    pub last_name: String,
    /// Vehicle make.
    pub car_make: String,
    /// Vehicle license plate.
    pub license_plate: String,
    /// When the place was occupied.
    pub created_at: DateTime<Utc>,
    /// `true` while the place is occupied by this record.
    pub is_active: bool,
    /// When the place was freed; set iff `is_active` is `false`.
    pub free_up_time: Option<DateTime<Utc>>,
}

impl ParkingSpaceLog {
    /// Marks the record vacated at `at`.
    ///
    /// # Errors
    ///
    /// Returns `ParkingError::AlreadyFree` if the record is already inactive.
    pub fn vacate(&mut self, at: DateTime<Utc>) -> Result<(), ParkingError> {
        if !self.is_active {
            return Err(ParkingError::AlreadyFree(self.place_number));
        }
        self.is_active = false;
        self.free_up_time = Some(at);
        Ok(())
    }

    /// Case-insensitive exact match on both owner names.
    #[must_use]
    pub fn is_owned_by(&self, first_name: &str, last_name: &str) -> bool {
        owner_key(&self.first_name) == owner_key(first_name)
            && owner_key(&self.last_name) == owner_key(last_name)
    }
}

/// Case-folded form of an owner name used for lookups.
///
/// Folding uses Unicode lowercase mappings, independent of any database
/// locale, so stores persist this key instead of folding in SQL.
#[must_use]
pub fn owner_key(name: &str) -> String {
    name.to_lowercase()
}

/// A record that has not been persisted yet; the store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParkingSpaceLog {
    /// Client-visible correlation token.
    pub log_id: Uuid,
    /// Selected place.
    pub place_number: u32,
    /// Driver first name.
    pub first_name: String,
    /// Driver last name.
    pub last_name: String,
    /// Vehicle make.
    pub car_make: String,
    /// Vehicle license plate.
    pub license_plate: String,
    /// When the place was occupied.
    pub created_at: DateTime<Utc>,
}

impl NewParkingSpaceLog {
    /// Attaches the store-assigned identifier, producing an active record.
    #[must_use]
    pub fn into_log(self, id: i64) -> ParkingSpaceLog {
        ParkingSpaceLog {
            id,
            log_id: self.log_id,
            place_number: self.place_number,
            first_name: self.first_name,
            last_name: self.last_name,
            car_make: self.car_make,
            license_plate: self.license_plate,
            created_at: self.created_at,
            is_active: true,
            free_up_time: None,
        }
    }
}
