//! Wall-clock capability.
//!
//! Validity checks and the integrity monitor read time through this trait
//! so tests can inject a controlled clock.

use chrono::NaiveDateTime;
use nodelock_types::timestamp;

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current local time at second precision.
    fn now(&self) -> NaiveDateTime;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        timestamp::now_local()
    }
}
