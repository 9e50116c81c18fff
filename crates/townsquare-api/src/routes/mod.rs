//! Route modules organized by resource.

pub mod content;
pub mod games;
pub mod health;
