//! Property tests for time-slot arithmetic and overlap.

use chrono::NaiveTime;
use proptest::prelude::*;

use marcel::domain::value_objects::{BusinessHours, TimeSlot};
use marcel::error::BookingError;

fn start_time() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, prop::sample::select(vec![0u32, 15, 30, 45]))
        .prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn slot() -> impl Strategy<Value = TimeSlot> {
    (0u32..23, 0u32..60, 1i64..=120).prop_map(|(h, m, len)| {
        let start = NaiveTime::from_hms_opt(h, m, 0).unwrap();
        let hours = BusinessHours {
            opening: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            closing: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
        };
        // Clamp the duration so the window never wraps midnight
        let remaining = (hours.closing - start).num_minutes();
        TimeSlot::compute(start, len.min(remaining.max(1)), &hours).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a computed slot has exactly the requested duration and lies
    /// inside business hours, or computation fails with OutOfHours.
    #[test]
    fn property_compute_respects_business_hours(
        start in start_time(),
        duration in 1i64..=240,
    ) {
        let hours = BusinessHours::default();
        match TimeSlot::compute(start, duration, &hours) {
            Ok(slot) => {
                prop_assert_eq!(slot.start(), start);
                prop_assert_eq!(slot.duration_minutes(), duration);
                prop_assert!(slot.start() >= hours.opening);
                prop_assert!(slot.end() <= hours.closing);
            }
            Err(BookingError::OutOfHours { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// PROPERTY: non-positive durations are always rejected.
    #[test]
    fn property_compute_rejects_non_positive_durations(
        start in start_time(),
        duration in -240i64..=0,
    ) {
        let err = TimeSlot::compute(start, duration, &BusinessHours::default()).unwrap_err();
        let is_invalid_duration = matches!(err, BookingError::InvalidDuration { .. });
        prop_assert!(is_invalid_duration);
    }

    /// PROPERTY: overlap is symmetric and reflexive.
    #[test]
    fn property_overlap_is_symmetric(a in slot(), b in slot()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert!(a.overlaps(&a));
    }

    /// PROPERTY: back-to-back slots never overlap.
    #[test]
    fn property_adjacent_slots_do_not_overlap(
        h in 8u32..18,
        first_len in 1i64..=60,
        second_len in 1i64..=60,
    ) {
        let hours = BusinessHours::default();
        let start = NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let first = TimeSlot::compute(start, first_len, &hours).unwrap();
        let second = TimeSlot::compute(first.end(), second_len, &hours).unwrap();
        prop_assert!(!first.overlaps(&second));
        prop_assert!(!second.overlaps(&first));
    }

    /// PROPERTY: the "HH:MM-HH:MM" form round-trips.
    #[test]
    fn property_display_round_trips(s in slot()) {
        let rendered = s.to_string();
        let parsed: TimeSlot = rendered.parse().unwrap();
        prop_assert_eq!(parsed, s);
    }

    /// PROPERTY: parsing arbitrary short strings never panics.
    #[test]
    fn property_parse_never_panics(input in ".{0,32}") {
        let _ = input.parse::<TimeSlot>();
    }
}
