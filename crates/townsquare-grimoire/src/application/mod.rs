//! Application services: command and query handlers over the game store.

pub mod command_handlers;
pub mod query_handlers;
