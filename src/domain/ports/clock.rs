//! Clock port - the single source of "now"
//!
//! All date/time comparisons in the engine route through one injected clock
//! so every comparison shares one timezone and tests can drive the sweepers
//! deterministically.

use chrono::{NaiveDate, NaiveDateTime};

/// Abstract source of the current salon-local date and time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
