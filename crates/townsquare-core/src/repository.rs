//! Versioned snapshot repository abstraction.
//!
//! A repository holds one snapshot per identifier together with a version
//! counter and a last-modified stamp. Writers read a snapshot, compute a
//! replacement without holding any lock, and hand it back through
//! [`SnapshotRepository::compare_and_commit`], which only succeeds when the
//! stored version is still the one they read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Version assigned to a freshly created snapshot.
pub const INITIAL_VERSION: i64 = 1;

/// A snapshot together with its concurrency metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedSnapshot<S> {
    /// Identifier of the stored record.
    pub id: Uuid,
    /// Monotonically increasing version, starting at [`INITIAL_VERSION`].
    pub version: i64,
    /// Time of the last successful commit, whole seconds.
    pub last_modified: DateTime<Utc>,
    /// The stored value.
    pub snapshot: S,
}

/// Result of a compare-and-commit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome<S> {
    /// The replacement was stored; carries the new record.
    Committed(VersionedSnapshot<S>),
    /// Another writer committed first; carries the record as it is now.
    Conflict(VersionedSnapshot<S>),
}

/// Repository trait for creating, loading and conditionally replacing
/// versioned snapshots.
#[async_trait]
pub trait SnapshotRepository<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Store `snapshot` under `id` at [`INITIAL_VERSION`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if `id` is already taken or the
    /// store is unusable.
    async fn create(
        &self,
        id: Uuid,
        snapshot: S,
        created_at: DateTime<Utc>,
    ) -> Result<VersionedSnapshot<S>, DomainError>;

    /// Load the current record for `id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GameNotFound` if nothing is stored under `id`.
    async fn load(&self, id: Uuid) -> Result<VersionedSnapshot<S>, DomainError>;

    /// Replace the snapshot for `id` if its version still equals
    /// `expected_version`. On success the version advances by exactly one
    /// and the last-modified stamp becomes `modified_at`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GameNotFound` if nothing is stored under `id`.
    async fn compare_and_commit(
        &self,
        id: Uuid,
        expected_version: i64,
        snapshot: S,
        modified_at: DateTime<Utc>,
    ) -> Result<CommitOutcome<S>, DomainError>;
}
