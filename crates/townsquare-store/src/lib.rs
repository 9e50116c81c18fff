//! Town Square: snapshot storage.
//!
//! Games live only as long as the process; nothing is persisted.

pub mod memory_repository;
