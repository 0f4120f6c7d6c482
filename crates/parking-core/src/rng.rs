//! Random number generator abstraction for slot selection.
//!
//! In production a single `StdRng` seeded once from the operating system is
//! shared for the lifetime of the process. Tests inject a scripted
//! implementation so the chosen place number is predictable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Production RNG: one `StdRng`, seeded from the OS at construction.
#[derive(Debug)]
pub struct OsSeededRng {
    inner: StdRng,
}

impl OsSeededRng {
    /// Creates a generator seeded from operating-system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Creates a generator from a fixed seed (reproducible runs).
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for OsSeededRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterministicRng for OsSeededRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.inner.random_range(min..=max)
    }
}
