//! PostgreSQL record store for the parking service.

pub mod pg_parking_log_repository;
pub mod schema;

pub use pg_parking_log_repository::PgParkingLogRepository;
pub use schema::MIGRATOR;
