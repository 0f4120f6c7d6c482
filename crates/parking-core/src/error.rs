//! Error kinds shared by the store, the allocation service, and the API.

use std::time::Duration;

use thiserror::Error;

/// Top-level parking error type.
#[derive(Debug, Error)]
pub enum ParkingError {
    /// Every slot in the lot is occupied.
    #[error("no free parking spaces available")]
    NoFreeSpace,

    /// Release was requested for a place with no active record.
    #[error("parking space {0} is already free")]
    AlreadyFree(u32),

    /// A required field is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The shared secret header is absent or wrong.
    #[error("Invalid API Key. Check 'X-API-Key' header.")]
    Unauthorized,

    /// The store refused an insert because the place already has an active
    /// record.
    #[error("parking space {0} is already occupied")]
    SpaceTaken(u32),

    /// Every park attempt lost the race for its selected place.
    #[error("could not reserve a parking space after {0} attempts")]
    SpaceContended(u32),

    /// The underlying store failed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A store call did not complete before its deadline.
    #[error("store call timed out after {0:?}")]
    StoreTimeout(Duration),
}

impl ParkingError {
    /// Returns `true` for errors the caller can fix by changing the request
    /// or retrying later.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NoFreeSpace
                | Self::AlreadyFree(_)
                | Self::InvalidInput(_)
                | Self::Unauthorized
                | Self::SpaceTaken(_)
                | Self::SpaceContended(_)
        )
    }
}
