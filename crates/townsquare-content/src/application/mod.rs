//! Application services: lookups over the loaded reference library.

pub mod query_handlers;
