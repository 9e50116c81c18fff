//! Command handlers for the grimoire context.
//!
//! Handlers read a snapshot, run the rules against a private copy with no
//! lock held, and commit through the repository's compare-and-swap. A lost
//! race is reported to the caller, never retried or merged here.

use tracing::{debug, info, warn};
use uuid::Uuid;

use townsquare_core::clock::Clock;
use townsquare_core::command::Command;
use townsquare_core::conditional::WriteConditions;
use townsquare_core::error::DomainError;
use townsquare_core::repository::{CommitOutcome, SnapshotRepository, VersionedSnapshot};

use crate::domain::commands::{ApplyActions, CreateGame};
use crate::domain::dispatcher::apply_batch;
use crate::domain::model::Game;
use crate::domain::version_tag::weak_tag;

/// A stored game with its version and last-modified stamp.
pub type VersionedGame = VersionedSnapshot<Game>;

/// Handles the `CreateGame` command: validates the document and stores it at
/// the initial version.
///
/// The handler allocates the `game_id`.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the document breaks a seating or
/// reminder invariant, or the repository's error if storing fails.
pub async fn handle_create_game(
    command: &CreateGame,
    clock: &dyn Clock,
    repo: &dyn SnapshotRepository<Game>,
) -> Result<VersionedGame, DomainError> {
    let game = command
        .game
        .clone()
        .validated()
        .map_err(|e| DomainError::Validation(e.to_string()))?;
    let game_id = Uuid::new_v4();

    let record = repo
        .create(game_id, game, clock.now_whole_seconds())
        .await?;

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        game_id = %game_id,
        players = record.snapshot.players.len(),
        "game created"
    );
    Ok(record)
}

/// Loads a game and checks a writer's validators against it.
///
/// Callers that must reject stale writers before reading a request body use
/// this directly; `handle_apply_actions` repeats the check on its own read.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` for an unknown game and
/// `DomainError::PreconditionFailed` if the validators are stale.
pub async fn check_write_conditions(
    game_id: Uuid,
    conditions: &WriteConditions,
    repo: &dyn SnapshotRepository<Game>,
) -> Result<VersionedGame, DomainError> {
    let record = repo.load(game_id).await?;
    conditions
        .check(&weak_tag(record.version), record.last_modified)
        .map_err(|failure| {
            warn!(
                game_id = %game_id,
                version = record.version,
                %failure,
                "precondition failed"
            );
            DomainError::PreconditionFailed {
                game_id,
                reason: failure.to_string(),
            }
        })?;
    Ok(record)
}

/// Handles the `ApplyActions` command: checks the caller's preconditions,
/// applies the batch to the snapshot it read, and commits only if no other
/// writer got there first.
///
/// On `CommitOutcome::Conflict` nothing was written and the outcome carries
/// the game as it is now.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` for an unknown game,
/// `DomainError::PreconditionFailed` if the caller's validators are stale, and
/// `DomainError::InvalidAction` if a rule rejects an action.
pub async fn handle_apply_actions(
    command: &ApplyActions,
    clock: &dyn Clock,
    repo: &dyn SnapshotRepository<Game>,
) -> Result<CommitOutcome<Game>, DomainError> {
    let record = check_write_conditions(command.game_id, &command.conditions, repo).await?;

    let next = apply_batch(&record.snapshot, &command.actions).map_err(|err| {
        debug!(
            correlation_id = %command.correlation_id,
            game_id = %command.game_id,
            index = err.index,
            reason = %err.source,
            "batch rejected"
        );
        DomainError::InvalidAction {
            index: err.index,
            reason: err.source.to_string(),
        }
    })?;

    let outcome = repo
        .compare_and_commit(
            command.game_id,
            record.version,
            next,
            clock.now_whole_seconds(),
        )
        .await?;

    match &outcome {
        CommitOutcome::Committed(committed) => info!(
            command_type = command.command_type(),
            correlation_id = %command.correlation_id,
            game_id = ?command.target_id(),
            actions = command.actions.len(),
            version = committed.version,
            "actions applied"
        ),
        CommitOutcome::Conflict(current) => warn!(
            correlation_id = %command.correlation_id,
            game_id = %command.game_id,
            expected = record.version,
            actual = current.version,
            "lost commit race"
        ),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use townsquare_core::conditional::{WriteConditions, format_http_date};
    use townsquare_core::error::DomainError;
    use townsquare_core::repository::{CommitOutcome, SnapshotRepository};
    use townsquare_store::memory_repository::InMemorySnapshotRepository;
    use townsquare_test_support::{
        FailingSnapshotRepository, FixedClock, RacingSnapshotRepository, SteppingClock,
    };
    use uuid::Uuid;

    use super::{check_write_conditions, handle_apply_actions, handle_create_game};
    use crate::domain::actions::{Action, AddPlayer, MovePlayer, RemovePlayer};
    use crate::domain::commands::{ApplyActions, CreateGame};
    use crate::domain::fixtures::{reminder, seated};
    use crate::domain::model::Game;
    use crate::domain::position::Position;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    fn add(id: i64) -> Action {
        Action::AddPlayer(AddPlayer {
            id,
            after_player: None,
            character: None,
            alignment: None,
        })
    }

    fn apply(game_id: Uuid, conditions: WriteConditions, actions: Vec<Action>) -> ApplyActions {
        ApplyActions {
            correlation_id: Uuid::new_v4(),
            game_id,
            conditions,
            actions,
        }
    }

    async fn stored(repo: &InMemorySnapshotRepository<Game>, game: Game) -> Uuid {
        let command = CreateGame {
            correlation_id: Uuid::new_v4(),
            game,
        };
        handle_create_game(&command, &FixedClock(fixed_now()), repo)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_game_stores_version_one_at_truncated_time() {
        // Arrange
        let repo = InMemorySnapshotRepository::new();
        let clock = FixedClock(fixed_now() + Duration::milliseconds(750));
        let command = CreateGame {
            correlation_id: Uuid::new_v4(),
            game: seated(&[1, 2]),
        };

        // Act
        let record = handle_create_game(&command, &clock, &repo).await.unwrap();

        // Assert
        assert_eq!(record.version, 1);
        assert_eq!(record.last_modified, fixed_now());
        assert_eq!(repo.load(record.id).await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_create_game_canonicalizes_reminders() {
        // Arrange
        let repo = InMemorySnapshotRepository::new();
        let mut game = seated(&[1, 2, 3]);
        game.reminders = vec![reminder("Monk", "Safe", Position::Shared(3, 2))];

        // Act
        let id = stored(&repo, game).await;

        // Assert
        let record = repo.load(id).await.unwrap();
        assert_eq!(record.snapshot.reminders[0].position, Position::Shared(2, 3));
    }

    #[tokio::test]
    async fn test_create_game_rejects_invalid_document() {
        // Arrange
        let repo = InMemorySnapshotRepository::new();
        let command = CreateGame {
            correlation_id: Uuid::new_v4(),
            game: seated(&[1, 1]),
        };

        // Act
        let result = handle_create_game(&command, &FixedClock(fixed_now()), &repo).await;

        // Assert
        match result {
            Err(DomainError::Validation(message)) => assert_eq!(message, "id must be unique"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_apply_actions_commits_and_advances_version() {
        // Arrange
        let repo = InMemorySnapshotRepository::new();
        let id = stored(&repo, seated(&[1])).await;
        let clock = SteppingClock::new(fixed_now() + Duration::seconds(30), Duration::seconds(1));
        let command = apply(id, WriteConditions::default(), vec![add(2), add(3)]);

        // Act
        let outcome = handle_apply_actions(&command, &clock, &repo).await.unwrap();

        // Assert
        match outcome {
            CommitOutcome::Committed(record) => {
                assert_eq!(record.version, 2);
                assert_eq!(record.last_modified, fixed_now() + Duration::seconds(30));
                assert_eq!(record.snapshot.seating(), vec![1, 2, 3]);
            }
            CommitOutcome::Conflict(record) => panic!("unexpected conflict: {record:?}"),
        }
    }

    #[tokio::test]
    async fn test_apply_actions_unknown_game_is_not_found() {
        // Arrange
        let repo = InMemorySnapshotRepository::new();
        let id = Uuid::new_v4();
        let command = apply(id, WriteConditions::default(), vec![add(1)]);

        // Act
        let result = handle_apply_actions(&command, &FixedClock(fixed_now()), &repo).await;

        // Assert
        match result {
            Err(DomainError::GameNotFound(missing)) => assert_eq!(missing, id),
            other => panic!("expected GameNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_apply_actions_stale_if_match_fails_without_mutation() {
        // Arrange
        let repo = InMemorySnapshotRepository::new();
        let id = stored(&repo, seated(&[1])).await;
        let conditions = WriteConditions {
            if_match: Some("W/2".to_owned()),
            if_unmodified_since: None,
        };
        let command = apply(id, conditions, vec![add(2)]);

        // Act
        let result = handle_apply_actions(&command, &FixedClock(fixed_now()), &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::PreconditionFailed { .. })));
        let record = repo.load(id).await.unwrap();
        assert_eq!(record.version, 1);
        assert_eq!(record.snapshot.seating(), vec![1]);
    }

    #[tokio::test]
    async fn test_check_write_conditions_returns_current_record() {
        // Arrange
        let repo = InMemorySnapshotRepository::new();
        let id = stored(&repo, seated(&[1, 2])).await;
        let conditions = WriteConditions {
            if_match: Some(r#"W/"1""#.to_owned()),
            if_unmodified_since: None,
        };

        // Act
        let record = check_write_conditions(id, &conditions, &repo).await.unwrap();

        // Assert
        assert_eq!(record.version, 1);
        assert_eq!(record.snapshot.seating(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_apply_actions_honours_current_validators() {
        // Arrange
        let repo = InMemorySnapshotRepository::new();
        let id = stored(&repo, seated(&[1])).await;
        let conditions = WriteConditions {
            if_match: Some("W/1".to_owned()),
            if_unmodified_since: Some(format_http_date(fixed_now())),
        };
        let command = apply(id, conditions, vec![add(2)]);

        // Act
        let outcome = handle_apply_actions(&command, &FixedClock(fixed_now()), &repo)
            .await
            .unwrap();

        // Assert
        assert!(matches!(outcome, CommitOutcome::Committed(_)));
    }

    #[tokio::test]
    async fn test_apply_actions_rule_failure_reports_index_and_reason() {
        // Arrange
        let repo = InMemorySnapshotRepository::new();
        let id = stored(&repo, seated(&[1, 2])).await;
        let command = apply(
            id,
            WriteConditions::default(),
            vec![
                add(3),
                Action::MovePlayer(MovePlayer {
                    id: 3,
                    after_player: 3,
                }),
            ],
        );

        // Act
        let result = handle_apply_actions(&command, &FixedClock(fixed_now()), &repo).await;

        // Assert
        match result {
            Err(DomainError::InvalidAction { index, reason }) => {
                assert_eq!(index, 1);
                assert_eq!(reason, "id and afterPlayer must be distinct");
            }
            other => panic!("expected InvalidAction, got {other:?}"),
        }
        let record = repo.load(id).await.unwrap();
        assert_eq!(record.version, 1);
        assert_eq!(record.snapshot.seating(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_apply_actions_losing_race_returns_current_game() {
        // Arrange
        let repo = RacingSnapshotRepository::new(InMemorySnapshotRepository::new());
        let id = Uuid::new_v4();
        repo.create(id, seated(&[1, 2]), fixed_now()).await.unwrap();
        repo.arm(seated(&[1, 2, 9]));
        let command = apply(
            id,
            WriteConditions::default(),
            vec![Action::RemovePlayer(RemovePlayer { id: 2 })],
        );

        // Act
        let outcome = handle_apply_actions(&command, &FixedClock(fixed_now()), &repo)
            .await
            .unwrap();

        // Assert
        match outcome {
            CommitOutcome::Conflict(current) => {
                assert_eq!(current.version, 2);
                assert_eq!(current.snapshot.seating(), vec![1, 2, 9]);
            }
            CommitOutcome::Committed(record) => panic!("lost update committed: {record:?}"),
        }
        assert_eq!(repo.load(id).await.unwrap().snapshot.seating(), vec![1, 2, 9]);
    }

    #[tokio::test]
    async fn test_apply_actions_propagates_store_failure() {
        // Arrange
        let repo = FailingSnapshotRepository::<Game>::new();
        let command = apply(Uuid::new_v4(), WriteConditions::default(), vec![add(1)]);

        // Act
        let result = handle_apply_actions(&command, &FixedClock(fixed_now()), &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
