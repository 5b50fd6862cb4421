//! Immutable value types shared across the domain

pub mod actor;
pub mod ids;
pub mod slot_key;
pub mod status;
pub mod time_slot;

pub use actor::{Actor, Role};
pub use ids::{BookingId, CustomerId, ServiceId, SpecialistId};
pub use slot_key::SlotKey;
pub use status::{BookingStatus, PaymentStatus};
pub use time_slot::{BusinessHours, TimeSlot};
