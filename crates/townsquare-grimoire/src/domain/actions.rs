//! The seven actions a storyteller can apply to a game.
//!
//! On the wire an action is a JSON object whose `action` member names its
//! kind, e.g. `{"action": "addPlayer", "id": 4, "afterPlayer": 1}`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::model::{Alignment, PlayerId, character_or_none};
use super::position::Position;

/// Seat a new player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlayer {
    /// Id of the new player.
    pub id: PlayerId,
    /// Seat the new player directly after this one; absent or zero appends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_player: Option<PlayerId>,
    /// Character for the new player.
    #[serde(
        default,
        deserialize_with = "character_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub character: Option<String>,
    /// Alignment for the new player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

/// Remove a player and every reminder tied to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovePlayer {
    /// Id of the player to remove.
    pub id: PlayerId,
}

/// Move a player to the seat after another player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePlayer {
    /// Id of the player to move.
    pub id: PlayerId,
    /// The player to sit after.
    pub after_player: PlayerId,
}

/// Replace a player's character and alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePlayer {
    /// Id of the player to update.
    pub id: PlayerId,
    /// The new character; absent or empty clears it.
    #[serde(
        default,
        deserialize_with = "character_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub character: Option<String>,
    /// The new alignment; absent clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

/// Place a reminder token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReminder {
    /// Character the token belongs to.
    pub character: String,
    /// Token label.
    pub token: String,
    /// Where to place it.
    pub position: Position,
}

/// Take a reminder token off the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveReminder {
    /// Character the token belongs to.
    pub character: String,
    /// Token label.
    pub token: String,
    /// Where the token currently lies.
    pub position: Position,
}

/// Move a reminder token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReminder {
    /// Character the token belongs to.
    pub character: String,
    /// Token label.
    pub token: String,
    /// Where the token currently lies.
    pub from_position: Position,
    /// Where it goes.
    pub to_position: Position,
}

/// One storyteller action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    /// See [`AddPlayer`].
    AddPlayer(AddPlayer),
    /// See [`RemovePlayer`].
    RemovePlayer(RemovePlayer),
    /// See [`MovePlayer`].
    MovePlayer(MovePlayer),
    /// See [`UpdatePlayer`].
    UpdatePlayer(UpdatePlayer),
    /// See [`AddReminder`].
    AddReminder(AddReminder),
    /// See [`RemoveReminder`].
    RemoveReminder(RemoveReminder),
    /// See [`MoveReminder`].
    MoveReminder(MoveReminder),
}

impl Action {
    /// The wire name of this action's kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddPlayer(_) => "addPlayer",
            Self::RemovePlayer(_) => "removePlayer",
            Self::MovePlayer(_) => "movePlayer",
            Self::UpdatePlayer(_) => "updatePlayer",
            Self::AddReminder(_) => "addReminder",
            Self::RemoveReminder(_) => "removeReminder",
            Self::MoveReminder(_) => "moveReminder",
        }
    }
}

/// Why a JSON value could not be read as an [`Action`].
#[derive(Debug, Error)]
pub enum ActionError {
    /// The `action` member is missing or names no known kind.
    #[error("invalid action")]
    InvalidAction,

    /// The kind is known but the remaining members do not fit it.
    #[error("malformed {kind} action: {source}")]
    Malformed {
        /// The action kind that was being decoded.
        kind: &'static str,
        /// The underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
}

fn decode<T>(kind: &'static str, value: Value) -> Result<T, ActionError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(|source| ActionError::Malformed { kind, source })
}

impl TryFrom<Value> for Action {
    type Error = ActionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let kind = value
            .get("action")
            .and_then(Value::as_str)
            .ok_or(ActionError::InvalidAction)?;
        match kind {
            "addPlayer" => decode("addPlayer", value).map(Self::AddPlayer),
            "removePlayer" => decode("removePlayer", value).map(Self::RemovePlayer),
            "movePlayer" => decode("movePlayer", value).map(Self::MovePlayer),
            "updatePlayer" => decode("updatePlayer", value).map(Self::UpdatePlayer),
            "addReminder" => decode("addReminder", value).map(Self::AddReminder),
            "removeReminder" => decode("removeReminder", value).map(Self::RemoveReminder),
            "moveReminder" => decode("moveReminder", value).map(Self::MoveReminder),
            _ => Err(ActionError::InvalidAction),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(de::Error::custom)
    }
}
