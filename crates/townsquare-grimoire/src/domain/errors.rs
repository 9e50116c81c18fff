//! Errors raised by the transition rules.

use thiserror::Error;

/// Why a single action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A new player was given id zero.
    #[error("id must be non-zero")]
    ZeroId,

    /// A new player reused an id already in the seating circle.
    #[error("id must be unique")]
    DuplicateId,

    /// The action names a player who is not seated.
    #[error("id must be id of existing player")]
    UnknownPlayer,

    /// `afterPlayer` on an add names a player who is not seated.
    #[error("afterPlayer must be absent or id of existing player")]
    UnknownOptionalAfterPlayer,

    /// `afterPlayer` on a move names a player who is not seated.
    #[error("afterPlayer must be id of existing player")]
    UnknownAfterPlayer,

    /// A player cannot be moved to sit after themselves.
    #[error("id and afterPlayer must be distinct")]
    SameIdAndAfterPlayer,

    /// The move would split the two seats of a shared reminder.
    #[error("moving a player must not disturb a shared reminder token")]
    SharedReminderDisturbed,

    /// No reminder matches the given character, token and position.
    #[error("reminder must be present")]
    ReminderNotFound,

    /// The position does not resolve against the seating circle.
    #[error("position must be central, player id, or array with 2 adjacent player ids")]
    InvalidPosition,
}

/// A rule failure inside a batch, with the index of the failing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("action {index}: {source}")]
pub struct BatchError {
    /// Zero-based index of the rejected action.
    pub index: usize,
    /// The rule's reason.
    #[source]
    pub source: RuleError,
}
