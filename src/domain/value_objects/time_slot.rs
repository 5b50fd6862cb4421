//! TimeSlot value object - a contiguous time-of-day window
//!
//! The foundation every other component relies on for correctness. Slots are
//! half-open: a slot ending at 10:00 does NOT overlap one starting at 10:00.
//! The "HH:MM-HH:MM" string is a display format only; comparisons always use
//! the structured times.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BookingError, BookingResult};

/// The window slots must fall inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    pub opening: NaiveTime,
    pub closing: NaiveTime,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            opening: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            closing: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        }
    }
}

impl BusinessHours {
    /// True iff `[start, end]` lies inside `[opening, closing]`
    pub fn contains(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start >= self.opening && end <= self.closing
    }
}

/// A contiguous time-of-day interval during which a service occupies a
/// specialist. Invariant: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    /// Build a slot from explicit bounds
    pub fn new(start: NaiveTime, end: NaiveTime) -> BookingResult<Self> {
        if start >= end {
            return Err(BookingError::InvalidDuration {
                minutes: (end - start).num_minutes(),
            });
        }
        Ok(Self { start, end })
    }

    /// Derive a slot from a start time plus the summed service duration,
    /// validating it against business hours
    pub fn compute(
        start: NaiveTime,
        total_duration_minutes: i64,
        hours: &BusinessHours,
    ) -> BookingResult<Self> {
        if total_duration_minutes <= 0 {
            return Err(BookingError::InvalidDuration {
                minutes: total_duration_minutes,
            });
        }

        let (end, wrapped) = start.overflowing_add_signed(Duration::minutes(total_duration_minutes));
        // A window that wraps past midnight can never fit the business day
        if wrapped != 0 || !hours.contains(start, end) {
            return Err(BookingError::OutOfHours {
                start,
                end,
                opening: hours.opening,
                closing: hours.closing,
            });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Half-open interval overlap: boundary touches do not count
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

impl FromStr for TimeSlot {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BookingError::InvalidSlotFormat {
            value: s.to_string(),
        };
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start = NaiveTime::parse_from_str(start, "%H:%M").map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(end, "%H:%M").map_err(|_| invalid())?;
        TimeSlot::new(start, end).map_err(|_| invalid())
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeSlot {
        TimeSlot::new(t(h1, m1), t(h2, m2)).unwrap()
    }

    #[test]
    fn compute_adds_duration() {
        let s = TimeSlot::compute(t(9, 0), 90, &BusinessHours::default()).unwrap();
        assert_eq!(s.start(), t(9, 0));
        assert_eq!(s.end(), t(10, 30));
        assert_eq!(s.duration_minutes(), 90);
    }

    #[test]
    fn compute_before_opening_is_out_of_hours() {
        let err = TimeSlot::compute(t(7, 30), 60, &BusinessHours::default()).unwrap_err();
        assert!(matches!(err, BookingError::OutOfHours { .. }));
    }

    #[test]
    fn compute_past_closing_is_out_of_hours() {
        let err = TimeSlot::compute(t(19, 30), 60, &BusinessHours::default()).unwrap_err();
        assert!(matches!(err, BookingError::OutOfHours { .. }));
    }

    #[test]
    fn compute_at_boundaries_is_allowed() {
        assert!(TimeSlot::compute(t(8, 0), 60, &BusinessHours::default()).is_ok());
        assert!(TimeSlot::compute(t(19, 0), 60, &BusinessHours::default()).is_ok());
    }

    #[test]
    fn compute_rejects_non_positive_duration() {
        let err = TimeSlot::compute(t(9, 0), 0, &BusinessHours::default()).unwrap_err();
        assert!(matches!(err, BookingError::InvalidDuration { minutes: 0 }));
    }

    #[test]
    fn compute_rejects_midnight_wrap() {
        let hours = BusinessHours {
            opening: t(0, 0),
            closing: t(23, 59),
        };
        let err = TimeSlot::compute(t(23, 30), 60, &hours).unwrap_err();
        assert!(matches!(err, BookingError::OutOfHours { .. }));
    }

    #[test]
    fn overlap_is_boundary_exclusive() {
        let a = slot(9, 0, 10, 0);
        let b = slot(10, 0, 11, 0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn overlap_detects_partial_and_containment() {
        let a = slot(9, 0, 10, 0);
        assert!(a.overlaps(&slot(9, 30, 10, 30)));
        assert!(a.overlaps(&slot(8, 0, 12, 0)));
        assert!(a.overlaps(&slot(9, 15, 9, 45)));
        assert!(!a.overlaps(&slot(11, 0, 12, 0)));
    }

    #[test]
    fn display_and_parse_round_trip() {
        let s = slot(9, 0, 10, 30);
        assert_eq!(s.to_string(), "09:00-10:30");
        assert_eq!("09:00-10:30".parse::<TimeSlot>().unwrap(), s);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("0900-1000".parse::<TimeSlot>().is_err());
        assert!("09:00".parse::<TimeSlot>().is_err());
        assert!("10:00-09:00".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn serde_uses_slot_string() {
        let s = slot(9, 0, 10, 0);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"09:00-10:00\"");
        let parsed: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, s);
    }
}
