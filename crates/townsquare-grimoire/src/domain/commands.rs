//! Commands for the grimoire context.

use townsquare_core::command::Command;
use townsquare_core::conditional::WriteConditions;
use uuid::Uuid;

use super::actions::Action;
use super::model::Game;

/// Command to start a new game from a full document.
#[derive(Debug, Clone)]
pub struct CreateGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The initial game document, not yet validated.
    pub game: Game,
}

impl Command for CreateGame {
    fn command_type(&self) -> &'static str {
        "grimoire.create_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to apply a batch of actions to a stored game.
#[derive(Debug, Clone)]
pub struct ApplyActions {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game to update.
    pub game_id: Uuid,
    /// Validators the caller asserted about the version it last saw.
    pub conditions: WriteConditions,
    /// The actions, applied in order and atomically.
    pub actions: Vec<Action>,
}

impl Command for ApplyActions {
    fn command_type(&self) -> &'static str {
        "grimoire.apply_actions"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn target_id(&self) -> Option<Uuid> {
        Some(self.game_id)
    }
}
