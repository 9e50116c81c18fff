//! Query handlers for the grimoire context.

use uuid::Uuid;

use townsquare_core::error::DomainError;
use townsquare_core::repository::SnapshotRepository;

use crate::application::command_handlers::VersionedGame;
use crate::domain::model::Game;

/// Retrieves a stored game with its version and last-modified stamp.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` if no game exists for the ID.
pub async fn get_game_by_id(
    game_id: Uuid,
    repo: &dyn SnapshotRepository<Game>,
) -> Result<VersionedGame, DomainError> {
    repo.load(game_id).await
}
