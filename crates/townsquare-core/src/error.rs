//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No game exists under the given identifier.
    #[error("game not found: {0}")]
    GameNotFound(Uuid),

    /// No reference document exists under the given identifier.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// A caller-asserted precondition (version tag or modification time) no
    /// longer holds.
    #[error("precondition failed on game {game_id}: {reason}")]
    PreconditionFailed {
        /// The game the precondition was asserted against.
        game_id: Uuid,
        /// Which precondition failed.
        reason: String,
    },

    /// An action in a batch was rejected; the whole batch was discarded.
    #[error("{reason}")]
    InvalidAction {
        /// Zero-based position of the failing action within its batch.
        index: usize,
        /// The rule's reason for rejecting the action.
        reason: String,
    },

    /// A malformed document or payload.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/storage error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
