//! `PostgreSQL` implementation of the `ParkingLogRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, warn};
use uuid::Uuid;

use parking_core::error::ParkingError;
use parking_core::log::{NewParkingSpaceLog, ParkingSpaceLog, owner_key};
use parking_core::repository::ParkingLogRepository;

use crate::schema::ACTIVE_PLACE_INDEX;

const SELECT_COLUMNS: &str = "id, log_id, place_number, first_name, last_name, car_make, \
     license_plate, created_at, is_active, free_up_time";

/// Row shape of `parking_space_logs`.
#[derive(Debug, FromRow)]
struct ParkingSpaceLogRow {
    id: i64,
    log_id: Uuid,
    place_number: i32,
    first_name: String,
    last_name: String,
    car_make: String,
    license_plate: String,
    created_at: DateTime<Utc>,
    is_active: bool,
    free_up_time: Option<DateTime<Utc>>,
}

impl TryFrom<ParkingSpaceLogRow> for ParkingSpaceLog {
    type Error = ParkingError;

    fn try_from(row: ParkingSpaceLogRow) -> Result<Self, Self::Error> {
        let place_number = u32::try_from(row.place_number).map_err(|_| {
            ParkingError::StoreUnavailable(format!(
                "row {} has invalid place_number {}",
                row.id, row.place_number
            ))
        })?;
        Ok(Self {
            id: row.id,
            log_id: row.log_id,
            place_number,
            first_name: row.first_name,
            last_name: row.last_name,
            car_make: row.car_make,
            license_plate: row.license_plate,
            created_at: row.created_at,
            is_active: row.is_active,
            free_up_time: row.free_up_time,
        })
    }
}

fn store_error(err: sqlx::Error) -> ParkingError {
    warn!(error = %err, "parking store query failed");
    ParkingError::StoreUnavailable(err.to_string())
}

fn place_to_db(place_number: u32) -> Result<i32, ParkingError> {
    i32::try_from(place_number)
        .map_err(|_| ParkingError::InvalidInput(format!("place_number {place_number} out of range")))
}

fn into_logs(rows: Vec<ParkingSpaceLogRow>) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
    rows.into_iter().map(ParkingSpaceLog::try_from).collect()
}

/// PostgreSQL-backed parking log repository.
#[derive(Debug, Clone)]
pub struct PgParkingLogRepository {
    pool: PgPool,
}

impl PgParkingLogRepository {
    /// Creates a new `PgParkingLogRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParkingLogRepository for PgParkingLogRepository {
    async fn count_active(&self) -> Result<u64, ParkingError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM parking_space_logs WHERE is_active")
                .fetch_one(&self.pool)
                .await
                .map_err(store_error)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn list_active(&self) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM parking_space_logs WHERE is_active");
        let rows: Vec<ParkingSpaceLogRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;
        into_logs(rows)
    }

    async fn find_active_by_place(
        &self,
        place_number: u32,
    ) -> Result<Option<ParkingSpaceLog>, ParkingError> {
        let Ok(place) = i32::try_from(place_number) else {
            return Ok(None);
        };
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM parking_space_logs \
             WHERE place_number = $1 AND is_active"
        );
        let row: Option<ParkingSpaceLogRow> = sqlx::query_as(&sql)
            .bind(place)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;
        row.map(ParkingSpaceLog::try_from).transpose()
    }

    async fn insert(&self, log: NewParkingSpaceLog) -> Result<ParkingSpaceLog, ParkingError> {
        let place = place_to_db(log.place_number)?;
        let sql = format!(
            "INSERT INTO parking_space_logs \
             (log_id, place_number, first_name, last_name, first_name_key, last_name_key, \
              car_make, license_plate, created_at, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE) \
             RETURNING {SELECT_COLUMNS}"
        );
        let result: Result<ParkingSpaceLogRow, sqlx::Error> = sqlx::query_as(&sql)
            .bind(log.log_id)
            .bind(place)
            .bind(&log.first_name)
            .bind(&log.last_name)
            .bind(owner_key(&log.first_name))
            .bind(owner_key(&log.last_name))
            .bind(&log.car_make)
            .bind(&log.license_plate)
            .bind(log.created_at)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => {
                debug!(id = row.id, place_number = log.place_number, "inserted parking space log");
                ParkingSpaceLog::try_from(row)
            }
            Err(sqlx::Error::Database(db_err))
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(ACTIVE_PLACE_INDEX) =>
            {
                Err(ParkingError::SpaceTaken(log.place_number))
            }
            Err(err) => Err(store_error(err)),
        }
    }

    async fn update(&self, log: &ParkingSpaceLog) -> Result<(), ParkingError> {
        let result = sqlx::query(
            "UPDATE parking_space_logs SET is_active = $2, free_up_time = $3 WHERE id = $1",
        )
        .bind(log.id)
        .bind(log.is_active)
        .bind(log.free_up_time)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(ParkingError::StoreUnavailable(format!(
                "parking space log {} does not exist",
                log.id
            )));
        }
        Ok(())
    }

    async fn find_active_by_owner(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM parking_space_logs \
             WHERE is_active AND first_name_key = $1 AND last_name_key = $2"
        );
        let rows: Vec<ParkingSpaceLogRow> = sqlx::query_as(&sql)
            .bind(owner_key(first_name))
            .bind(owner_key(last_name))
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;
        into_logs(rows)
    }
}
