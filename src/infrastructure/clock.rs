//! Clock implementations

use std::sync::Mutex;

use chrono::{Duration, NaiveDateTime};

use crate::domain::ports::Clock;

/// Wall clock in the salon's local timezone
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Manually driven clock for tests and replay tooling
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.guard() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.guard();
        *now += by;
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, NaiveDateTime> {
        match self.now.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.guard()
    }
}
