//! Application layer for the allocation context.

pub mod command_handlers;
mod deadline;
pub mod query_handlers;
