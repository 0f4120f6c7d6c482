//! Parking service: space allocation bounded context.
//!
//! Responsible for counting free places, assigning a random free place to an
//! arriving vehicle, freeing a place on departure, and answering owner
//! lookups over active records.

pub mod application;
pub mod domain;
