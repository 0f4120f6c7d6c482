//! Route modules.

pub mod docs;
pub mod health;
pub mod parking;
