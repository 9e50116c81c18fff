//! The game document: seating circle, players and reminders.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::RuleError;
use super::position::{self, Position};

/// Identifier of a player. Zero is reserved and never names a player.
pub type PlayerId = i64;

/// Which team a player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// The good team.
    Good,
    /// The evil team.
    Evil,
}

/// A seat at the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Seat identity; stable while the seat moves around the circle.
    pub id: PlayerId,
    /// Display coordinates, owned by the client.
    #[serde(default)]
    pub position: [i64; 2],
    /// The character assigned to this seat.
    #[serde(
        default,
        deserialize_with = "character_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub character: Option<String>,
    /// The alignment assigned to this seat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Whether the player is still alive.
    #[serde(default)]
    pub alive: bool,
    /// Votes remaining to a dead player.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ghost_votes: u32,
    /// Set on creation and whenever the character changes.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub first_night: bool,
}

/// Reads an optional character, treating `""` the same as absent.
pub(crate) fn character_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let character = Option::<String>::deserialize(deserializer)?;
    Ok(character.filter(|name| !name.is_empty()))
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// A reminder token placed in the grimoire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// The character this token belongs to.
    pub character: String,
    /// The token label.
    pub token: String,
    /// Where the token lies, always canonical once stored.
    pub position: Position,
}

/// The aggregate root: one game of the storyteller's grimoire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Identifier of the script being played.
    #[serde(default)]
    pub script: String,
    /// The seating circle in clockwise order; the last seat neighbours the first.
    #[serde(default)]
    pub players: Vec<Player>,
    /// Reminder tokens, unordered.
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl Game {
    /// Returns the seat index of the player with `id`.
    #[must_use]
    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|player| player.id == id)
    }

    /// Returns the player with `id`.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Returns the seating order as a list of ids.
    #[must_use]
    pub fn seating(&self) -> Vec<PlayerId> {
        self.players.iter().map(|player| player.id).collect()
    }

    /// Canonicalizes `raw` against the current seating order.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::InvalidPosition` if `raw` names a missing player or
    /// a pair of seats that are not neighbours.
    pub fn resolve_position(&self, raw: Position) -> Result<Position, RuleError> {
        position::resolve(&self.players, raw)
    }

    /// Checks a document received from outside and canonicalizes every
    /// reminder position in it.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::ZeroId` or `RuleError::DuplicateId` for a bad
    /// seating circle and `RuleError::InvalidPosition` for a reminder that
    /// does not resolve.
    pub fn validated(mut self) -> Result<Self, RuleError> {
        let mut seen = HashSet::with_capacity(self.players.len());
        for player in &self.players {
            if player.id == 0 {
                return Err(RuleError::ZeroId);
            }
            if !seen.insert(player.id) {
                return Err(RuleError::DuplicateId);
            }
        }
        let players = &self.players;
        for reminder in &mut self.reminders {
            reminder.position = position::resolve(players, reminder.position)?;
        }
        Ok(self)
    }
}
