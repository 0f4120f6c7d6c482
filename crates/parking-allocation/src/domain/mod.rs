//! Domain layer for the allocation context.

pub mod commands;
pub mod lot;
