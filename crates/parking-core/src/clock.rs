//! Time source for occupancy timestamps.
//!
//! `created_at` and `free_up_time` are always taken from a `Clock` so that
//! handlers can be driven with a fixed instant in tests.

use chrono::{DateTime, SubsecRound, Utc};

/// Source of the current UTC instant.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system clock.
///
/// Instants are truncated to microseconds, the resolution of a `TIMESTAMPTZ`
/// column, so a record compares equal before and after a store round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}
