//! In-memory implementation of the `SnapshotRepository` trait.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use townsquare_core::error::DomainError;
use townsquare_core::repository::{
    CommitOutcome, INITIAL_VERSION, SnapshotRepository, VersionedSnapshot,
};

/// Mutex-guarded map of versioned snapshots.
///
/// The lock is held only for a lookup, a version comparison and a write.
/// Callers do all of their rule evaluation on the clone handed out by
/// [`SnapshotRepository::load`].
#[derive(Debug)]
pub struct InMemorySnapshotRepository<S> {
    records: Mutex<HashMap<Uuid, VersionedSnapshot<S>>>,
}

impl<S> InMemorySnapshotRepository<S> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    fn records(&self) -> Result<MutexGuard<'_, HashMap<Uuid, VersionedSnapshot<S>>>, DomainError> {
        self.records
            .lock()
            .map_err(|_| DomainError::Infrastructure("snapshot store lock poisoned".to_owned()))
    }
}

impl<S> Default for InMemorySnapshotRepository<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> SnapshotRepository<S> for InMemorySnapshotRepository<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn create(
        &self,
        id: Uuid,
        snapshot: S,
        created_at: DateTime<Utc>,
    ) -> Result<VersionedSnapshot<S>, DomainError> {
        let record = VersionedSnapshot {
            id,
            version: INITIAL_VERSION,
            last_modified: created_at,
            snapshot,
        };
        match self.records()?.entry(id) {
            Entry::Occupied(_) => Err(DomainError::Infrastructure(format!(
                "snapshot {id} already exists"
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn load(&self, id: Uuid) -> Result<VersionedSnapshot<S>, DomainError> {
        self.records()?
            .get(&id)
            .cloned()
            .ok_or(DomainError::GameNotFound(id))
    }

    async fn compare_and_commit(
        &self,
        id: Uuid,
        expected_version: i64,
        snapshot: S,
        modified_at: DateTime<Utc>,
    ) -> Result<CommitOutcome<S>, DomainError> {
        let mut records = self.records()?;
        let current = records.get_mut(&id).ok_or(DomainError::GameNotFound(id))?;
        if current.version != expected_version {
            debug!(
                game_id = %id,
                expected_version,
                actual_version = current.version,
                "rejecting stale commit"
            );
            return Ok(CommitOutcome::Conflict(current.clone()));
        }
        current.version += 1;
        current.last_modified = modified_at;
        current.snapshot = snapshot;
        Ok(CommitOutcome::Committed(current.clone()))
    }
}
