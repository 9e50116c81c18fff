//! Reminder positions and their resolution against the seating circle.
//!
//! On the wire a position is one of three shapes: the string `"central"`, a
//! bare player id, or a two-element array of player ids. Inside the engine it
//! is always a [`Position`]. A zero id stands for "no seat", so `0` and
//! `[0, 0]` mean central and `[id, 0]` means a single seat.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::RuleError;
use super::model::{Player, PlayerId};

/// Where a reminder token lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WirePosition", into = "WirePosition")]
pub enum Position {
    /// In the middle of the table, attached to no seat.
    Central,
    /// On one seat.
    Single(PlayerId),
    /// Between two neighbouring seats, stored as (predecessor, successor).
    Shared(PlayerId, PlayerId),
}

impl Position {
    /// Whether this position is attached to the seat `id`.
    #[must_use]
    pub fn references(self, id: PlayerId) -> bool {
        match self {
            Self::Central => false,
            Self::Single(seat) => seat == id,
            Self::Shared(first, second) => first == id || second == id,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WirePosition {
    Label(String),
    Seat(PlayerId),
    Pair([PlayerId; 2]),
}

/// A position that is none of the three accepted wire shapes.
#[derive(Debug)]
pub struct InvalidWirePosition(String);

impl fmt::Display for InvalidWirePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid reminder position {:?}", self.0)
    }
}

impl TryFrom<WirePosition> for Position {
    type Error = InvalidWirePosition;

    fn try_from(wire: WirePosition) -> Result<Self, Self::Error> {
        match wire {
            WirePosition::Label(label) if label == "central" => Ok(Self::Central),
            WirePosition::Label(label) => Err(InvalidWirePosition(label)),
            WirePosition::Seat(0) | WirePosition::Pair([0, 0]) => Ok(Self::Central),
            WirePosition::Seat(id) | WirePosition::Pair([id, 0]) => Ok(Self::Single(id)),
            WirePosition::Pair([first, second]) => Ok(Self::Shared(first, second)),
        }
    }
}

impl From<Position> for WirePosition {
    fn from(position: Position) -> Self {
        match position {
            Position::Central => Self::Label("central".to_owned()),
            Position::Single(id) => Self::Seat(id),
            Position::Shared(first, second) => Self::Pair([first, second]),
        }
    }
}

/// Canonicalizes `raw` against the seating order in `players`.
///
/// A single seat must exist. A shared position must name two distinct,
/// present seats where one directly follows the other around the circle; it
/// comes back ordered (predecessor, successor) whatever order was given. With
/// only two seats at the table the earlier seat comes first.
///
/// # Errors
///
/// Returns `RuleError::InvalidPosition` when `raw` does not resolve.
pub fn resolve(players: &[Player], raw: Position) -> Result<Position, RuleError> {
    let seat_of = |id: PlayerId| players.iter().position(|player| player.id == id);
    match raw {
        Position::Central => Ok(Position::Central),
        Position::Single(id) => seat_of(id)
            .map(|_| raw)
            .ok_or(RuleError::InvalidPosition),
        Position::Shared(first, second) => {
            if first == second {
                return Err(RuleError::InvalidPosition);
            }
            let (Some(i), Some(j)) = (seat_of(first), seat_of(second)) else {
                return Err(RuleError::InvalidPosition);
            };
            let len = players.len();
            if len == 2 {
                // Each of two seats follows the other; seat order decides.
                return Ok(if i < j {
                    Position::Shared(first, second)
                } else {
                    Position::Shared(second, first)
                });
            }
            if (i + 1) % len == j {
                Ok(Position::Shared(first, second))
            } else if (j + 1) % len == i {
                Ok(Position::Shared(second, first))
            } else {
                Err(RuleError::InvalidPosition)
            }
        }
    }
}
