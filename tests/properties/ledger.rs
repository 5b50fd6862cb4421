//! Property tests for the availability ledger invariant.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;

use marcel::application::{BookingLifecycle, BookingRequest};
use marcel::config::SchedulingConfig;
use marcel::domain::entities::{Customer, ServiceItem, Specialist};
use marcel::domain::ports::{PaymentStore, SchedulingStore};
use marcel::domain::value_objects::Actor;
use marcel::infrastructure::{FixedClock, MemoryStore, RecordingNotifier};

fn base_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap()
}

fn salon() -> (Arc<MemoryStore>, BookingLifecycle<MemoryStore, MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    store.add_service(ServiceItem::new(1, "Cut", 50_000, 30));
    store.add_service(ServiceItem::new(2, "Color", 120_000, 90));
    store.add_specialist(Specialist::new(1, "Ava"));
    store.add_specialist(Specialist::new(2, "Bea"));
    for id in 10..16u64 {
        store.add_customer(Customer::registered(
            id,
            format!("c{id}"),
            format!("c{id}@example.com"),
        ));
    }
    let lifecycle = BookingLifecycle::new(
        store.clone(),
        store.clone(),
        store.clone() as Arc<dyn PaymentStore>,
        Arc::new(RecordingNotifier::new()),
        Arc::new(FixedClock::new(base_now())),
        SchedulingConfig::default(),
    );
    (store, lifecycle)
}

/// One randomized booking attempt
#[derive(Debug, Clone)]
struct Attempt {
    customer: u64,
    hour: u32,
    minute: u32,
    service: u64,
    cancel: bool,
}

fn attempt() -> impl Strategy<Value = Attempt> {
    (
        10u64..16,
        8u32..18,
        prop::sample::select(vec![0u32, 15, 30]),
        1u64..=2,
        prop::bool::weighted(0.3),
    )
        .prop_map(|(customer, hour, minute, service, cancel)| Attempt {
            customer,
            hour,
            minute,
            service,
            cancel,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: no sequence of creates and cancels leaves two active
    /// bookings overlapping on one specialist, and every active booking
    /// still holds its ledger entry.
    #[test]
    fn property_active_bookings_never_overlap(
        attempts in prop::collection::vec(attempt(), 1..24),
    ) {
        let (store, lifecycle) = salon();
        let date = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();

        for a in attempts {
            let request = BookingRequest::new(
                date,
                NaiveTime::from_hms_opt(a.hour, a.minute, 0).unwrap(),
                vec![a.service],
            );
            let actor = Actor::customer(a.customer);
            // Rejections are expected; the invariant is about what survives
            if let Ok(booking) = lifecycle.create(&actor, &request) {
                if a.cancel {
                    lifecycle.cancel(&actor, booking.id).unwrap();
                }
            }
        }

        let bookings = lifecycle.all_bookings().unwrap();
        let active: Vec<_> = bookings.iter().filter(|b| b.is_active()).collect();

        for (i, a) in active.iter().enumerate() {
            for b in &active[i + 1..] {
                if a.specialist_id == b.specialist_id && a.date == b.date {
                    prop_assert!(
                        !a.slot.overlaps(&b.slot),
                        "bookings {} and {} overlap on specialist {}",
                        a.id,
                        b.id,
                        a.specialist_id
                    );
                }
            }
        }

        for booking in &active {
            let entries = store.entries_for_day(booking.specialist_id, booking.date).unwrap();
            prop_assert!(
                entries.iter().any(|e| e.key == booking.slot_key()),
                "active booking {} lost its ledger entry",
                booking.id
            );
        }
    }
}
