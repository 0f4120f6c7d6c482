//! Record store database schema.

use sqlx::migrate::Migrator;

/// Embedded migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Partial unique index that allows a single active row per place.
pub const ACTIVE_PLACE_INDEX: &str = "uq_parking_space_logs_active_place";
