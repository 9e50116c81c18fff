//! Town Square: reference documents.
//!
//! Script files and board layouts are read once at startup, hashed, and then
//! served verbatim by id. Nothing here changes after loading.

pub mod application;
pub mod domain;
