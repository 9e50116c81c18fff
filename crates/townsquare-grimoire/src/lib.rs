//! Town Square: grimoire bounded context.
//!
//! Responsible for the seating circle, the characters and alignments assigned
//! to each seat, reminder tokens, and the versioned read-modify-write cycle
//! through which concurrent storytellers edit one shared game.

pub mod application;
pub mod domain;
