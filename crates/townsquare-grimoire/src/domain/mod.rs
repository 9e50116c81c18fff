//! Domain model and pure transition rules.

pub mod actions;
pub mod commands;
pub mod dispatcher;
pub mod errors;
pub mod model;
pub mod position;
pub mod transitions;
pub mod version_tag;

#[cfg(test)]
pub(crate) mod fixtures;
