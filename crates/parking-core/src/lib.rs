//! Parking Core: shared domain abstractions.
//!
//! This crate defines the record model, the store contract, and the
//! determinism seams (clock, RNG) that the allocation service and its
//! infrastructure depend on. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod log;
pub mod repository;
pub mod rng;
