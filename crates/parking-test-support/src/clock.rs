//! Test clock: a `Clock` pinned to one instant.

use chrono::{DateTime, Utc};
use parking_core::clock::Clock;

/// A clock that always returns the same instant, so `created_at` and
/// `free_up_time` can be asserted exactly.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
