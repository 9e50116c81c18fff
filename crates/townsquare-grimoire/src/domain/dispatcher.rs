//! Applies actions to a game, one at a time or as an atomic batch.

use super::actions::Action;
use super::errors::{BatchError, RuleError};
use super::model::Game;

impl Game {
    /// Applies one action.
    ///
    /// # Errors
    ///
    /// Returns the rule's `RuleError` if the action is rejected.
    pub fn apply(self, action: &Action) -> Result<Self, RuleError> {
        match action {
            Action::AddPlayer(action) => self.add_player(action),
            Action::RemovePlayer(action) => self.remove_player(action),
            Action::MovePlayer(action) => self.move_player(action),
            Action::UpdatePlayer(action) => self.update_player(action),
            Action::AddReminder(action) => self.add_reminder(action),
            Action::RemoveReminder(action) => self.remove_reminder(action),
            Action::MoveReminder(action) => self.move_reminder(action),
        }
    }
}

/// Applies `actions` in order, each against the result of the previous one.
///
/// The batch is all-or-nothing: the first rejected action discards every
/// earlier result and `game` is left as it was.
///
/// # Errors
///
/// Returns a `BatchError` naming the index of the first rejected action.
pub fn apply_batch(game: &Game, actions: &[Action]) -> Result<Game, BatchError> {
    actions
        .iter()
        .enumerate()
        .try_fold(game.clone(), |next, (index, action)| {
            next.apply(action)
                .map_err(|source| BatchError { index, source })
        })
}
