//! Interface definitions for infrastructure
//!
//! All I/O the domain and application layers perform goes through these
//! traits.

pub mod catalog;
pub mod clock;
pub mod notifier;
pub mod payment_store;
pub mod scheduling_store;

pub use catalog::Catalog;
pub use clock::Clock;
pub use notifier::{BookingEvent, Notification, Notifier, NoopNotifier};
pub use payment_store::PaymentStore;
pub use scheduling_store::SchedulingStore;
