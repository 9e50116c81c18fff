//! Transition rules: one pure function per action kind.
//!
//! Every rule consumes a game value and returns its successor. Callers that
//! need to keep the original hand in a clone; a published snapshot is never
//! changed in place.

use super::actions::{
    AddPlayer, AddReminder, MovePlayer, MoveReminder, RemovePlayer, RemoveReminder, UpdatePlayer,
};
use super::errors::RuleError;
use super::model::{Game, Player, Reminder};
use super::position::{self, Position};

impl Game {
    /// Seats a new player at the end of the circle, or directly after
    /// `afterPlayer` when one is given.
    ///
    /// # Errors
    ///
    /// `ZeroId`, `DuplicateId`, or `UnknownOptionalAfterPlayer`.
    pub fn add_player(mut self, action: &AddPlayer) -> Result<Self, RuleError> {
        if action.id == 0 {
            return Err(RuleError::ZeroId);
        }
        if self.player_index(action.id).is_some() {
            return Err(RuleError::DuplicateId);
        }
        let player = Player {
            id: action.id,
            character: action.character.clone(),
            alignment: action.alignment,
            alive: true,
            first_night: true,
            ..Player::default()
        };
        match action.after_player.filter(|&after| after != 0) {
            None => self.players.push(player),
            Some(after) => {
                let seat = self
                    .player_index(after)
                    .ok_or(RuleError::UnknownOptionalAfterPlayer)?;
                self.players.insert(seat + 1, player);
            }
        }
        Ok(self)
    }

    /// Removes a player, every reminder belonging to their character, and
    /// every reminder lying on their seat.
    ///
    /// # Errors
    ///
    /// `UnknownPlayer`.
    pub fn remove_player(mut self, action: &RemovePlayer) -> Result<Self, RuleError> {
        let seat = self
            .player_index(action.id)
            .ok_or(RuleError::UnknownPlayer)?;
        let removed = self.players.remove(seat);
        self.reminders.retain(|reminder| {
            removed.character.as_deref() != Some(reminder.character.as_str())
                && !reminder.position.references(removed.id)
        });
        Ok(self)
    }

    /// Moves a player to the seat directly after `afterPlayer`.
    ///
    /// Shared reminders are re-resolved against the new order; if any of them
    /// no longer sits between neighbours the whole move is rejected.
    ///
    /// # Errors
    ///
    /// `SameIdAndAfterPlayer`, `UnknownPlayer`, `UnknownAfterPlayer`, or
    /// `SharedReminderDisturbed`.
    pub fn move_player(mut self, action: &MovePlayer) -> Result<Self, RuleError> {
        if action.id == action.after_player {
            return Err(RuleError::SameIdAndAfterPlayer);
        }
        let seat = self
            .player_index(action.id)
            .ok_or(RuleError::UnknownPlayer)?;
        let player = self.players.remove(seat);
        let after = self
            .player_index(action.after_player)
            .ok_or(RuleError::UnknownAfterPlayer)?;
        self.players.insert(after + 1, player);

        let players = &self.players;
        for reminder in &mut self.reminders {
            reminder.position = position::resolve(players, reminder.position)
                .map_err(|_| RuleError::SharedReminderDisturbed)?;
        }
        Ok(self)
    }

    /// Sets a player's alignment, and their character if it changed.
    ///
    /// A character change discards every reminder of the previous character
    /// and marks the player's first night again.
    ///
    /// # Errors
    ///
    /// `UnknownPlayer`.
    pub fn update_player(mut self, action: &UpdatePlayer) -> Result<Self, RuleError> {
        let seat = self
            .player_index(action.id)
            .ok_or(RuleError::UnknownPlayer)?;
        if self.players[seat].character != action.character {
            if let Some(previous) = self.players[seat].character.take() {
                self.reminders
                    .retain(|reminder| reminder.character != previous);
            }
            let player = &mut self.players[seat];
            player.character.clone_from(&action.character);
            player.first_night = true;
        }
        self.players[seat].alignment = action.alignment;
        Ok(self)
    }

    /// Places a reminder at the canonical form of the given position.
    ///
    /// # Errors
    ///
    /// `InvalidPosition`.
    pub fn add_reminder(mut self, action: &AddReminder) -> Result<Self, RuleError> {
        let position = self.resolve_position(action.position)?;
        self.reminders.push(Reminder {
            character: action.character.clone(),
            token: action.token.clone(),
            position,
        });
        Ok(self)
    }

    /// Removes the first reminder matching character, token and position.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` or `ReminderNotFound`.
    pub fn remove_reminder(mut self, action: &RemoveReminder) -> Result<Self, RuleError> {
        let index = self.find_reminder(&action.character, &action.token, action.position)?;
        self.reminders.remove(index);
        Ok(self)
    }

    /// Moves the first reminder matching character, token and
    /// `fromPosition` to `toPosition`.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` or `ReminderNotFound`.
    pub fn move_reminder(mut self, action: &MoveReminder) -> Result<Self, RuleError> {
        let index = self.find_reminder(&action.character, &action.token, action.from_position)?;
        let destination = self.resolve_position(action.to_position)?;
        self.reminders[index].position = destination;
        Ok(self)
    }

    fn find_reminder(
        &self,
        character: &str,
        token: &str,
        raw: Position,
    ) -> Result<usize, RuleError> {
        let position = self.resolve_position(raw)?;
        self.reminders
            .iter()
            .position(|reminder| {
                reminder.character == character
                    && reminder.token == token
                    && reminder.position == position
            })
            .ok_or(RuleError::ReminderNotFound)
    }
}
