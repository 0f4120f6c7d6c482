//! Lot settings and free-place computation.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use parking_core::log::ParkingSpaceLog;
use parking_core::rng::DeterministicRng;

/// Slot count used when none is configured.
pub const DEFAULT_TOTAL_SLOTS: u32 = 52;

/// Per store call deadline used when none is configured.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Conditional-insert attempts per park request used when none is configured.
pub const DEFAULT_PARK_ATTEMPTS: u32 = 3;

/// Immutable description of the lot, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingLot {
    total_slots: u32,
    store_timeout: Duration,
    park_attempts: u32,
}

impl ParkingLot {
    /// A lot with `total_slots` places numbered `1..=total_slots`.
    #[must_use]
    pub fn new(total_slots: u32) -> Self {
        Self {
            total_slots,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            park_attempts: DEFAULT_PARK_ATTEMPTS,
        }
    }

    /// Sets the deadline applied to each store call.
    #[must_use]
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Sets how many times a park request may lose the race for a place
    /// before giving up. Clamped to at least one.
    #[must_use]
    pub fn with_park_attempts(mut self, park_attempts: u32) -> Self {
        self.park_attempts = park_attempts.max(1);
        self
    }

    /// Number of places in the lot.
    #[must_use]
    pub fn total_slots(&self) -> u32 {
        self.total_slots
    }

    /// Deadline applied to each store call.
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    /// Maximum conditional-insert attempts per park request.
    #[must_use]
    pub fn park_attempts(&self) -> u32 {
        self.park_attempts
    }

    /// Free places given `active_count` occupied ones; saturates at zero.
    #[must_use]
    pub fn free_count(&self, active_count: u64) -> u64 {
        u64::from(self.total_slots).saturating_sub(active_count)
    }

    /// `true` when the number of active records already fills the lot.
    #[must_use]
    pub fn is_full(&self, active_count: usize) -> bool {
        active_count as u64 >= u64::from(self.total_slots)
    }

    /// Places in `1..=total_slots` not held by any of `active`, ascending.
    ///
    /// Records pointing outside the lot are ignored, so a lot whose count
    /// looks free can still come back empty here.
    #[must_use]
    pub fn free_places(&self, active: &[ParkingSpaceLog]) -> Vec<u32> {
        let occupied: HashSet<u32> = active.iter().map(|log| log.place_number).collect();
        (1..=self.total_slots)
            .filter(|place| !occupied.contains(place))
            .collect()
    }
}

impl Default for ParkingLot {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_SLOTS)
    }
}

/// Picks one member of `free` uniformly at random, or `None` when empty.
pub fn choose_place(free: &[u32], rng: &Mutex<dyn DeterministicRng + Send>) -> Option<u32> {
    let last = free.len().checked_sub(1)?;
    let max = u32::try_from(last).unwrap_or(u32::MAX);
    let index = {
        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.next_u32_range(0, max)
    };
    let index = usize::try_from(index).map_or(last, |i| i.min(last));
    free.get(index).copied()
}
