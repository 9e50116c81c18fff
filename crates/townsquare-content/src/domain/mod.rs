//! Domain layer for reference documents.

pub mod documents;
pub mod errors;
pub mod library;
