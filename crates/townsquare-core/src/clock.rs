//! Clock abstraction for determinism.

use chrono::{DateTime, SubsecRound, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time truncated to whole seconds.
    ///
    /// HTTP dates carry no sub-second precision, so every stored
    /// last-modified stamp goes through here.
    fn now_whole_seconds(&self) -> DateTime<Utc> {
        self.now().trunc_subsecs(0)
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
