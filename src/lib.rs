//! # Marcel
//!
//! Appointment scheduling and booking lifecycle engine for a salon-style
//! service business: timed slots inside business hours, a per-specialist
//! availability ledger, a guarded state machine from reservation to
//! checkout, and background sweepers that reclaim abandoned bookings.
//!
//! ## Architecture
//!
//! The crate follows hexagonal architecture:
//!
//! - **Domain** (`domain/`): entities, value objects, pure domain services
//!   and the port traits. No I/O.
//! - **Application** (`application/`): the [`BookingLifecycle`] and
//!   [`ExpirySweeper`] use cases, driving the domain through its ports.
//! - **Infrastructure** (`infrastructure/`): the in-memory store and clock
//!   implementations.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use chrono::NaiveTime;
//! use marcel::application::{BookingLifecycle, BookingRequest};
//! use marcel::config::SchedulingConfig;
//! use marcel::domain::entities::{Customer, ServiceItem, Specialist};
//! use marcel::domain::ports::PaymentStore;
//! use marcel::domain::value_objects::Actor;
//! use marcel::infrastructure::{MemoryStore, RecordingNotifier, SystemClock};
//!
//! let store = Arc::new(MemoryStore::new());
//! store.add_service(ServiceItem::new(1, "Cut", 50_000, 30));
//! store.add_specialist(Specialist::new(1, "Ava"));
//! store.add_customer(Customer::registered(10, "Mai", "mai@example.com"));
//!
//! let lifecycle = BookingLifecycle::new(
//!     store.clone(),
//!     store.clone(),
//!     store.clone() as Arc<dyn PaymentStore>,
//!     Arc::new(RecordingNotifier::new()),
//!     Arc::new(SystemClock),
//!     SchedulingConfig::default(),
//! );
//!
//! let tomorrow = chrono::Local::now().date_naive() + chrono::Days::new(1);
//! let request = BookingRequest::new(
//!     tomorrow,
//!     NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
//!     vec![1],
//! );
//! let booking = lifecycle.create(&Actor::customer(10), &request).unwrap();
//! assert_eq!(booking.slot.to_string(), "10:00-10:30");
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{BookingLifecycle, BookingRequest, ExpirySweeper, SweepReport};
pub use config::SchedulingConfig;
pub use error::{BookingError, BookingResult, ErrorKind};
