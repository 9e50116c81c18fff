//! Town Square Core: shared domain abstractions.
//!
//! This crate defines the traits and types that the bounded contexts and the
//! storage layer agree on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod conditional;
pub mod error;
pub mod repository;
