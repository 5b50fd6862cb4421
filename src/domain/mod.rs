//! Domain Layer
//!
//! Pure scheduling logic without I/O dependencies.
//!
//! - `entities/` - Booking, Customer, Specialist, ServiceItem, ledger entries
//! - `value_objects/` - TimeSlot, SlotKey, statuses, Actor
//! - `services/` - SpecialistSelector, CheckoutGate
//! - `ports/` - trait seams for storage, catalog, payments, notification, time

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
