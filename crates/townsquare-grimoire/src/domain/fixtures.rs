//! Builders shared by the domain tests.

use super::model::{Game, Player, PlayerId, Reminder};
use super::position::Position;

pub(crate) fn player(id: PlayerId) -> Player {
    Player {
        id,
        ..Player::default()
    }
}

pub(crate) fn seated(ids: &[PlayerId]) -> Game {
    Game {
        script: "trouble-brewing".to_owned(),
        players: ids.iter().copied().map(player).collect(),
        reminders: Vec::new(),
    }
}

pub(crate) fn reminder(character: &str, token: &str, position: Position) -> Reminder {
    Reminder {
        character: character.to_owned(),
        token: token.to_owned(),
        position,
    }
}
