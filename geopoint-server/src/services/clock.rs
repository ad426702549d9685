//! Clock abstraction
//!
//! Every time-dependent rule (punch cooldown, shift cap, vacation lead
//! time) reads the clock through this trait so tests can pin "now".

use chrono::NaiveDate;

use crate::utils::time::date_of_millis;

pub trait Clock: Send + Sync {
    /// Current time as Unix millis, UTC.
    fn now_millis(&self) -> i64;

    /// Current UTC calendar date.
    fn today_utc(&self) -> NaiveDate {
        date_of_millis(self.now_millis())
    }
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        shared::util::now_millis()
    }
}

/// Fixed clock for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
