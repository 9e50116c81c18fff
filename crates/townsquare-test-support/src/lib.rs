//! Shared test doubles and utilities for the Town Square grimoire service.

mod clock;
mod repository;

pub use clock::{FixedClock, SteppingClock};
pub use repository::{FailingSnapshotRepository, RacingSnapshotRepository};
