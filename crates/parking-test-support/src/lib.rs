//! Shared test doubles and utilities for the parking service.

mod clock;
mod fixtures;
mod repository;
mod rng;

pub use clock::FixedClock;
pub use fixtures::{active_log, fixed_now, new_log};
pub use repository::{
    ContendedParkingLogRepository, FailingParkingLogRepository, InMemoryParkingLogRepository,
    SlowParkingLogRepository,
};
pub use rng::{MockRng, SequenceRng};
