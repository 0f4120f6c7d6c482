//! Integration tests for `PgParkingLogRepository`.
//!
//! These need a running PostgreSQL reachable through `DATABASE_URL`; run them
//! with `cargo test -- --ignored`.

use chrono::{DateTime, TimeZone, Utc};
use parking_core::error::ParkingError;
use parking_core::log::NewParkingSpaceLog;
use parking_core::repository::ParkingLogRepository;
use parking_store::PgParkingLogRepository;
use sqlx::PgPool;
use uuid::Uuid;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

fn new_log(place_number: u32, first_name: &str, last_name: &str) -> NewParkingSpaceLog {
    NewParkingSpaceLog {
        log_id: Uuid::new_v4(),
        place_number,
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        car_make: "Toyota".to_owned(),
        license_plate: "A123BC777".to_owned(),
        created_at: fixed_now(),
    }
}

// --- insert + reads ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_assigns_id_and_is_listed_as_active(pool: PgPool) {
    let repo = PgParkingLogRepository::new(pool);

    let stored = repo.insert(new_log(4, "Ivan", "Ivanov")).await.unwrap();

    assert!(stored.id > 0);
    assert!(stored.is_active);
    assert_eq!(repo.count_active().await.unwrap(), 1);
    let active = repo.list_active().await.unwrap();
    assert_eq!(active, vec![stored.clone()]);
    assert_eq!(repo.find_active_by_place(4).await.unwrap(), Some(stored));
    assert_eq!(repo.find_active_by_place(5).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_returns_the_record_as_persisted(pool: PgPool) {
    let repo = PgParkingLogRepository::new(pool);
    let mut log = new_log(6, "Ivan", "Ivanov");
    log.created_at = Utc::now();

    let stored = repo.insert(log).await.unwrap();

    let listed = repo.list_active().await.unwrap();
    assert_eq!(listed, vec![stored.clone()]);
    assert_eq!(stored.created_at.timestamp_subsec_nanos() % 1_000, 0);
}

// --- conditional insert ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_second_active_insert_for_same_place_is_rejected(pool: PgPool) {
    let repo = PgParkingLogRepository::new(pool);
    repo.insert(new_log(2, "Ivan", "Ivanov")).await.unwrap();

    let result = repo.insert(new_log(2, "Petr", "Petrov")).await;

    assert!(matches!(result, Err(ParkingError::SpaceTaken(2))));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_place_can_be_reused_after_update_vacates_it(pool: PgPool) {
    let repo = PgParkingLogRepository::new(pool);
    let mut first = repo.insert(new_log(2, "Ivan", "Ivanov")).await.unwrap();
    first.vacate(fixed_now()).unwrap();
    repo.update(&first).await.unwrap();

    let second = repo.insert(new_log(2, "Petr", "Petrov")).await.unwrap();

    assert_eq!(repo.count_active().await.unwrap(), 1);
    assert_eq!(repo.find_active_by_place(2).await.unwrap(), Some(second));
}

// --- owner lookup ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_active_by_owner_is_case_insensitive_exact(pool: PgPool) {
    let repo = PgParkingLogRepository::new(pool);
    let matching = repo.insert(new_log(1, "ivan", "IVANOV")).await.unwrap();
    repo.insert(new_log(2, "Ivan", "Ivanova")).await.unwrap();
    let mut vacated = repo.insert(new_log(3, "Ivan", "Ivanov")).await.unwrap();
    vacated.vacate(fixed_now()).unwrap();
    repo.update(&vacated).await.unwrap();

    let found = repo.find_active_by_owner("Ivan", "Ivanov").await.unwrap();

    assert_eq!(found, vec![matching]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_active_by_owner_folds_cyrillic_names(pool: PgPool) {
    let repo = PgParkingLogRepository::new(pool);
    let matching = repo.insert(new_log(1, "иван", "ИВАНОВ")).await.unwrap();
    repo.insert(new_log(2, "Иван", "Иванова")).await.unwrap();

    let found = repo.find_active_by_owner("Иван", "Иванов").await.unwrap();

    assert_eq!(found, vec![matching]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_owner_names_are_not_treated_as_patterns(pool: PgPool) {
    let repo = PgParkingLogRepository::new(pool);
    repo.insert(new_log(1, "Ivan", "Ivanov")).await.unwrap();

    let found = repo.find_active_by_owner("Iv%", ".*").await.unwrap();

    assert!(found.is_empty());
}

// --- update ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_of_unknown_id_is_a_store_error(pool: PgPool) {
    let repo = PgParkingLogRepository::new(pool);
    let mut ghost = new_log(1, "Ivan", "Ivanov").into_log(9_999);
    ghost.vacate(fixed_now()).unwrap();

    let result = repo.update(&ghost).await;

    assert!(matches!(result, Err(ParkingError::StoreUnavailable(_))));
}
