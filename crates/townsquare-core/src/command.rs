//! Command abstractions.

use uuid::Uuid;

/// A request to change stored state, traced by correlation id.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name of the command, e.g. `grimoire.apply_actions`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// The record this command acts on. `None` when the command creates it.
    fn target_id(&self) -> Option<Uuid> {
        None
    }
}
