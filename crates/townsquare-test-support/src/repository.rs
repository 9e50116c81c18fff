//! Test repositories: mock `SnapshotRepository` implementations for tests.

use std::marker::PhantomData;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use townsquare_core::error::DomainError;
use townsquare_core::repository::{CommitOutcome, SnapshotRepository, VersionedSnapshot};
use uuid::Uuid;

/// A snapshot repository that always returns an infrastructure error. Useful
/// for testing error-handling paths.
#[derive(Debug)]
pub struct FailingSnapshotRepository<S>(PhantomData<fn() -> S>);

impl<S> FailingSnapshotRepository<S> {
    /// Create a new failing repository.
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<S> Default for FailingSnapshotRepository<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> SnapshotRepository<S> for FailingSnapshotRepository<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn create(
        &self,
        _id: Uuid,
        _snapshot: S,
        _created_at: DateTime<Utc>,
    ) -> Result<VersionedSnapshot<S>, DomainError> {
        Err(DomainError::Infrastructure("store unavailable".into()))
    }

    async fn load(&self, _id: Uuid) -> Result<VersionedSnapshot<S>, DomainError> {
        Err(DomainError::Infrastructure("store unavailable".into()))
    }

    async fn compare_and_commit(
        &self,
        _id: Uuid,
        _expected_version: i64,
        _snapshot: S,
        _modified_at: DateTime<Utc>,
    ) -> Result<CommitOutcome<S>, DomainError> {
        Err(DomainError::Infrastructure("store unavailable".into()))
    }
}

/// Wraps a repository so that a rival writer commits first.
///
/// Once [`RacingSnapshotRepository::arm`] is given a rival snapshot, the next
/// `compare_and_commit` stores the rival at the caller's expected version
/// before forwarding the caller's own commit, which then loses the race.
#[derive(Debug)]
pub struct RacingSnapshotRepository<S, R> {
    inner: R,
    rival: Mutex<Option<S>>,
}

impl<S, R> RacingSnapshotRepository<S, R> {
    /// Wrap `inner`; no rival is armed yet.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            rival: Mutex::new(None),
        }
    }

    /// Queue `rival` to win the next commit.
    pub fn arm(&self, rival: S) {
        if let Ok(mut slot) = self.rival.lock() {
            *slot = Some(rival);
        }
    }
}

#[async_trait]
impl<S, R> SnapshotRepository<S> for RacingSnapshotRepository<S, R>
where
    S: Clone + Send + Sync + 'static,
    R: SnapshotRepository<S>,
{
    async fn create(
        &self,
        id: Uuid,
        snapshot: S,
        created_at: DateTime<Utc>,
    ) -> Result<VersionedSnapshot<S>, DomainError> {
        self.inner.create(id, snapshot, created_at).await
    }

    async fn load(&self, id: Uuid) -> Result<VersionedSnapshot<S>, DomainError> {
        self.inner.load(id).await
    }

    async fn compare_and_commit(
        &self,
        id: Uuid,
        expected_version: i64,
        snapshot: S,
        modified_at: DateTime<Utc>,
    ) -> Result<CommitOutcome<S>, DomainError> {
        let rival = self
            .rival
            .lock()
            .map_err(|_| DomainError::Infrastructure("rival slot poisoned".into()))?
            .take();
        if let Some(rival) = rival {
            self.inner
                .compare_and_commit(id, expected_version, rival, modified_at)
                .await?;
        }
        self.inner
            .compare_and_commit(id, expected_version, snapshot, modified_at)
            .await
    }
}
