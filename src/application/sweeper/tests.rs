use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::application::booking::{BookingLifecycle, BookingRequest};
use crate::config::SchedulingConfig;
use crate::domain::entities::{Customer, ServiceItem, Specialist};
use crate::domain::ports::{BookingEvent, PaymentStore};
use crate::domain::value_objects::{Actor, BookingStatus};
use crate::infrastructure::{FixedClock, MemoryStore, RecordingNotifier};

use super::use_case::ExpirySweeper;

fn base_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

struct Harness {
    clock: Arc<FixedClock>,
    notifier: Arc<RecordingNotifier>,
    lifecycle: BookingLifecycle<MemoryStore, MemoryStore>,
    sweeper: ExpirySweeper<MemoryStore, MemoryStore>,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    store.add_service(ServiceItem::new(1, "Cut", 50_000, 30));
    store.add_specialist(Specialist::new(1, "Ava"));
    store.add_customer(Customer::registered(10, "Mai", "mai@example.com"));
    store.add_customer(Customer::registered(11, "Noa", "noa@example.com"));

    let clock = Arc::new(FixedClock::new(base_now()));
    let notifier = Arc::new(RecordingNotifier::new());
    let config = SchedulingConfig::default();
    let lifecycle = BookingLifecycle::new(
        store.clone(),
        store.clone(),
        store.clone() as Arc<dyn PaymentStore>,
        notifier.clone(),
        clock.clone(),
        config.clone(),
    );
    let sweeper = ExpirySweeper::new(
        store.clone(),
        store,
        notifier.clone(),
        clock.clone(),
        config,
    );
    Harness {
        clock,
        notifier,
        lifecycle,
        sweeper,
    }
}

fn request(hour: u32) -> BookingRequest {
    BookingRequest::new(
        NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        vec![1],
    )
}

#[test]
fn stale_sweep_cancels_old_pending_and_frees_the_slot() {
    let h = harness();
    let stale = h.lifecycle.create(&Actor::customer(10), &request(10)).unwrap();

    h.clock.advance(Duration::minutes(25));
    let fresh = h.lifecycle.create(&Actor::customer(11), &request(14)).unwrap();

    h.clock.advance(Duration::minutes(6)); // stale is 31min old, fresh 6min
    let report = h.sweeper.sweep_stale_pending().unwrap();
    assert_eq!(report.swept, 1);
    assert_eq!(report.failed, 0);

    assert_eq!(h.lifecycle.booking(stale.id).unwrap().status, BookingStatus::Cancelled);
    assert_eq!(h.lifecycle.booking(fresh.id).unwrap().status, BookingStatus::Pending);

    // The reclaimed window is bookable again
    h.lifecycle
        .create(&Actor::customer(11), &request(10))
        .unwrap();
}

#[test]
fn confirmed_bookings_survive_the_stale_sweep() {
    let h = harness();
    let booking = h.lifecycle.create(&Actor::customer(10), &request(10)).unwrap();
    h.lifecycle.confirm(&Actor::staff(1), booking.id).unwrap();

    h.clock.advance(Duration::hours(2));
    let report = h.sweeper.sweep_stale_pending().unwrap();
    assert_eq!(report.swept, 0);
    assert_eq!(h.lifecycle.booking(booking.id).unwrap().status, BookingStatus::Confirmed);
}

#[test]
fn stale_sweep_is_idempotent() {
    let h = harness();
    h.lifecycle.create(&Actor::customer(10), &request(10)).unwrap();
    h.clock.advance(Duration::minutes(31));

    assert_eq!(h.sweeper.sweep_stale_pending().unwrap().swept, 1);
    assert_eq!(h.sweeper.sweep_stale_pending().unwrap().swept, 0);
}

#[test]
fn stale_sweep_notifies_auto_cancellation() {
    let h = harness();
    h.lifecycle.create(&Actor::customer(10), &request(10)).unwrap();
    h.clock.advance(Duration::minutes(31));
    h.sweeper.sweep_stale_pending().unwrap();

    let sent = h.notifier.sent();
    assert!(sent
        .iter()
        .any(|n| n.event == BookingEvent::AutoCancelled && n.recipient == "mai@example.com"));
}

#[test]
fn past_date_sweep_expires_yesterdays_active_bookings() {
    let h = harness();
    let booking = h.lifecycle.create(&Actor::customer(10), &request(10)).unwrap();
    h.lifecycle.confirm(&Actor::staff(1), booking.id).unwrap();

    // Two days later the booking's date is behind us
    h.clock.set(
        NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(1, 5, 0)
            .unwrap(),
    );
    let report = h.sweeper.sweep_past_dates().unwrap();
    assert_eq!(report.swept, 1);
    assert_eq!(h.lifecycle.booking(booking.id).unwrap().status, BookingStatus::Cancelled);
    assert!(h
        .notifier
        .sent()
        .iter()
        .any(|n| n.event == BookingEvent::Expired));
}

#[test]
fn swept_booking_cannot_be_checked_out_afterwards() {
    let h = harness();
    let booking = h.lifecycle.create(&Actor::customer(10), &request(10)).unwrap();
    h.lifecycle.confirm(&Actor::staff(1), booking.id).unwrap();

    h.clock.set(
        NaiveDate::from_ymd_opt(2026, 3, 3)
            .unwrap()
            .and_hms_opt(9, 55, 0)
            .unwrap(),
    );
    h.lifecycle.check_in(&Actor::staff(1), booking.id).unwrap();

    // The appointment runs past midnight without ever being closed out
    h.clock.set(
        NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(1, 5, 0)
            .unwrap(),
    );
    assert_eq!(h.sweeper.sweep_past_dates().unwrap().swept, 1);

    // Cancelled is terminal even though check_in_time is stamped
    let err = h.lifecycle.check_out(&Actor::staff(1), booking.id).unwrap_err();
    assert!(matches!(
        err,
        crate::error::BookingError::BookingStatusInvalid {
            status: BookingStatus::Cancelled,
            ..
        }
    ));
    assert_eq!(
        h.lifecycle.booking(booking.id).unwrap().status,
        BookingStatus::Cancelled
    );
    let day = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
    assert_eq!(h.lifecycle.revenue_for_day(Some(day)).unwrap(), 0);
}

#[test]
fn past_date_sweep_spares_todays_bookings() {
    let h = harness();
    let booking = h.lifecycle.create(&Actor::customer(10), &request(10)).unwrap();

    // The morning of the booking's own date
    h.clock.set(
        NaiveDate::from_ymd_opt(2026, 3, 3)
            .unwrap()
            .and_hms_opt(1, 5, 0)
            .unwrap(),
    );
    assert_eq!(h.sweeper.sweep_past_dates().unwrap().swept, 0);
    assert_eq!(h.lifecycle.booking(booking.id).unwrap().status, BookingStatus::Pending);
}
