//! Test repositories: `ParkingLogRepository` doubles for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_core::error::ParkingError;
use parking_core::log::{NewParkingSpaceLog, ParkingSpaceLog};
use parking_core::repository::ParkingLogRepository;

#[derive(Debug, Default)]
struct Records {
    next_id: i64,
    logs: Vec<ParkingSpaceLog>,
}

/// A fully working in-memory store. Keeps insertion order, assigns
/// sequential ids starting at 1, and rejects a second active record for the
/// same place the way the PostgreSQL partial index does.
#[derive(Debug, Default)]
pub struct InMemoryParkingLogRepository {
    records: Mutex<Records>,
}

impl InMemoryParkingLogRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `logs`, bypassing the active-place
    /// check so tests can seed inconsistent data.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_logs(logs: Vec<ParkingSpaceLog>) -> Self {
        let next_id = logs.iter().map(|log| log.id).max().unwrap_or(0);
        Self {
            records: Mutex::new(Records { next_id, logs }),
        }
    }

    /// Returns a snapshot of every stored record, active or not.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn all_logs(&self) -> Vec<ParkingSpaceLog> {
        self.records.lock().unwrap().logs.clone()
    }
}

#[async_trait]
impl ParkingLogRepository for InMemoryParkingLogRepository {
    async fn count_active(&self) -> Result<u64, ParkingError> {
        let records = self.records.lock().unwrap();
        Ok(records.logs.iter().filter(|log| log.is_active).count() as u64)
    }

    async fn list_active(&self) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .logs
            .iter()
            .filter(|log| log.is_active)
            .cloned()
            .collect())
    }

    async fn find_active_by_place(
        &self,
        place_number: u32,
    ) -> Result<Option<ParkingSpaceLog>, ParkingError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .logs
            .iter()
            .find(|log| log.is_active && log.place_number == place_number)
            .cloned())
    }

    async fn insert(&self, log: NewParkingSpaceLog) -> Result<ParkingSpaceLog, ParkingError> {
        let mut records = self.records.lock().unwrap();
        if records
            .logs
            .iter()
            .any(|existing| existing.is_active && existing.place_number == log.place_number)
        {
            return Err(ParkingError::SpaceTaken(log.place_number));
        }
        records.next_id += 1;
        let stored = log.into_log(records.next_id);
        records.logs.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, log: &ParkingSpaceLog) -> Result<(), ParkingError> {
        let mut records = self.records.lock().unwrap();
        let Some(existing) = records.logs.iter_mut().find(|existing| existing.id == log.id) else {
            return Err(ParkingError::StoreUnavailable(format!(
                "parking space log {} does not exist",
                log.id
            )));
        };
        existing.is_active = log.is_active;
        existing.free_up_time = log.free_up_time;
        Ok(())
    }

    async fn find_active_by_owner(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .logs
            .iter()
            .filter(|log| log.is_active && log.is_owned_by(first_name, last_name))
            .cloned()
            .collect())
    }
}

/// A store that always returns an infrastructure error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingParkingLogRepository;

fn refused() -> ParkingError {
    ParkingError::StoreUnavailable("connection refused".into())
}

#[async_trait]
impl ParkingLogRepository for FailingParkingLogRepository {
    async fn count_active(&self) -> Result<u64, ParkingError> {
        Err(refused())
    }

    async fn list_active(&self) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
        Err(refused())
    }

    async fn find_active_by_place(
        &self,
        _place_number: u32,
    ) -> Result<Option<ParkingSpaceLog>, ParkingError> {
        Err(refused())
    }

    async fn insert(&self, _log: NewParkingSpaceLog) -> Result<ParkingSpaceLog, ParkingError> {
        Err(refused())
    }

    async fn update(&self, _log: &ParkingSpaceLog) -> Result<(), ParkingError> {
        Err(refused())
    }

    async fn find_active_by_owner(
        &self,
        _first_name: &str,
        _last_name: &str,
    ) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
        Err(refused())
    }
}

/// A store whose every call sleeps for `delay` before delegating to an
/// empty in-memory store. Used to exercise store deadlines.
#[derive(Debug)]
pub struct SlowParkingLogRepository {
    delay: Duration,
    inner: InMemoryParkingLogRepository,
}

impl SlowParkingLogRepository {
    /// Creates a store that stalls each call for `delay`.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: InMemoryParkingLogRepository::new(),
        }
    }
}

#[async_trait]
impl ParkingLogRepository for SlowParkingLogRepository {
    async fn count_active(&self) -> Result<u64, ParkingError> {
        tokio::time::sleep(self.delay).await;
        self.inner.count_active().await
    }

    async fn list_active(&self) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_active().await
    }

    async fn find_active_by_place(
        &self,
        place_number: u32,
    ) -> Result<Option<ParkingSpaceLog>, ParkingError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_active_by_place(place_number).await
    }

    async fn insert(&self, log: NewParkingSpaceLog) -> Result<ParkingSpaceLog, ParkingError> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert(log).await
    }

    async fn update(&self, log: &ParkingSpaceLog) -> Result<(), ParkingError> {
        tokio::time::sleep(self.delay).await;
        self.inner.update(log).await
    }

    async fn find_active_by_owner(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_active_by_owner(first_name, last_name).await
    }
}

/// An in-memory store whose first `conflicts` inserts fail with
/// `SpaceTaken`, as if another request had just reserved the same place.
#[derive(Debug)]
pub struct ContendedParkingLogRepository {
    remaining_conflicts: AtomicU32,
    insert_attempts: AtomicU32,
    inner: InMemoryParkingLogRepository,
}

impl ContendedParkingLogRepository {
    /// Creates a store that rejects the next `conflicts` inserts.
    #[must_use]
    pub fn new(conflicts: u32) -> Self {
        Self {
            remaining_conflicts: AtomicU32::new(conflicts),
            insert_attempts: AtomicU32::new(0),
            inner: InMemoryParkingLogRepository::new(),
        }
    }

    /// Number of `insert` calls observed so far.
    pub fn insert_attempts(&self) -> u32 {
        self.insert_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParkingLogRepository for ContendedParkingLogRepository {
    async fn count_active(&self) -> Result<u64, ParkingError> {
        self.inner.count_active().await
    }

    async fn list_active(&self) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
        self.inner.list_active().await
    }

    async fn find_active_by_place(
        &self,
        place_number: u32,
    ) -> Result<Option<ParkingSpaceLog>, ParkingError> {
        self.inner.find_active_by_place(place_number).await
    }

    async fn insert(&self, log: NewParkingSpaceLog) -> Result<ParkingSpaceLog, ParkingError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        let conflicted = self
            .remaining_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if conflicted {
            return Err(ParkingError::SpaceTaken(log.place_number));
        }
        self.inner.insert(log).await
    }

    async fn update(&self, log: &ParkingSpaceLog) -> Result<(), ParkingError> {
        self.inner.update(log).await
    }

    async fn find_active_by_owner(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<ParkingSpaceLog>, ParkingError> {
        self.inner.find_active_by_owner(first_name, last_name).await
    }
}
