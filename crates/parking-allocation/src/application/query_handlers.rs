//! Query handlers for the allocation context.
//!
//! Read-only operations over the store; every call is bounded by
//! `ParkingLot::store_timeout`.

use parking_core::error::ParkingError;
use parking_core::log::ParkingSpaceLog;
use parking_core::repository::ParkingLogRepository;

use crate::application::deadline::within;
use crate::domain::lot::ParkingLot;

/// Returns `total_slots - active`, never below zero.
///
/// # Errors
///
/// Returns store errors unchanged.
pub async fn get_free_spaces_count(
    lot: &ParkingLot,
    repo: &dyn ParkingLogRepository,
) -> Result<u64, ParkingError> {
    let active = within(lot.store_timeout(), repo.count_active()).await?;
    Ok(lot.free_count(active))
}

/// Returns every active record in store order.
///
/// # Errors
///
/// Returns store errors unchanged.
pub async fn list_occupied_spaces(
    lot: &ParkingLot,
    repo: &dyn ParkingLogRepository,
) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
    within(lot.store_timeout(), repo.list_active()).await
}

/// Returns active records whose owner names equal `first_name` and
/// `last_name` ignoring case. No match yields an empty list.
///
/// # Errors
///
/// Returns `ParkingError::InvalidInput` if either name is blank, and store
/// errors unchanged.
pub async fn get_logs_by_owner(
    first_name: &str,
    last_name: &str,
    lot: &ParkingLot,
    repo: &dyn ParkingLogRepository,
) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(ParkingError::InvalidInput(
            "first_name and last_name are required".into(),
        ));
    }
    within(
        lot.store_timeout(),
        repo.find_active_by_owner(first_name, last_name),
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use parking_core::error::ParkingError;
    use parking_test_support::{
        FailingParkingLogRepository, InMemoryParkingLogRepository, SlowParkingLogRepository,
        active_log, fixed_now,
    };

    use crate::application::query_handlers::{
        get_free_spaces_count, get_logs_by_owner, list_occupied_spaces,
    };
    use crate::domain::lot::ParkingLot;

    fn repo_with_history() -> InMemoryParkingLogRepository {
        let mut vacated = active_log(3, 3, "Ivan", "Ivanov");
        vacated.vacate(fixed_now()).unwrap();
        InMemoryParkingLogRepository::with_logs(vec![
            active_log(1, 1, "ivan", "IVANOV"),
            active_log(2, 2, "Ivan", "Ivanova"),
            vacated,
            active_log(4, 4, "Petr", "Petrov"),
        ])
    }

    #[tokio::test]
    async fn test_free_count_subtracts_active_records() {
        let lot = ParkingLot::new(52);
        let repo = repo_with_history();

        let free = get_free_spaces_count(&lot, &repo).await.unwrap();

        assert_eq!(free, 49);
    }

    #[tokio::test]
    async fn test_free_count_saturates_at_zero() {
        let lot = ParkingLot::new(2);
        let repo = repo_with_history();

        let free = get_free_spaces_count(&lot, &repo).await.unwrap();

        assert_eq!(free, 0);
    }

    #[tokio::test]
    async fn test_free_count_propagates_store_failure() {
        let lot = ParkingLot::new(2);

        let result = get_free_spaces_count(&lot, &FailingParkingLogRepository).await;

        assert!(matches!(result, Err(ParkingError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_list_occupied_returns_only_active_records_in_store_order() {
        let lot = ParkingLot::new(52);
        let repo = repo_with_history();

        let occupied = list_occupied_spaces(&lot, &repo).await.unwrap();

        let ids: Vec<i64> = occupied.iter().map(|log| log.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn test_logs_by_owner_matches_case_insensitive_exact_active_only() {
        let lot = ParkingLot::new(52);
        let repo = repo_with_history();

        let logs = get_logs_by_owner("Ivan", "Ivanov", &lot, &repo).await.unwrap();

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, 1);
        assert_eq!(logs[0].first_name, "ivan");
    }

    #[tokio::test]
    async fn test_logs_by_owner_without_match_is_empty() {
        let lot = ParkingLot::new(52);
        let repo = repo_with_history();

        let logs = get_logs_by_owner("Sidor", "Sidorov", &lot, &repo)
            .await
            .unwrap();

        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn test_logs_by_owner_requires_both_names() {
        let lot = ParkingLot::new(52);
        let repo = repo_with_history();

        let result = get_logs_by_owner("Ivan", " ", &lot, &repo).await;

        assert!(matches!(result, Err(ParkingError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_logs_by_owner_times_out_on_slow_store() {
        let lot = ParkingLot::new(52).with_store_timeout(Duration::from_millis(20));
        let repo = SlowParkingLogRepository::new(Duration::from_secs(5));

        let result = get_logs_by_owner("Ivan", "Ivanov", &lot, &repo).await;

        assert!(matches!(result, Err(ParkingError::StoreTimeout(_))));
    }
}
