//! Core domain entities

pub mod availability;
pub mod booking;
pub mod customer;
pub mod payment;
pub mod service_item;
pub mod specialist;

pub use availability::AvailabilityEntry;
pub use booking::Booking;
pub use customer::{Customer, GuestProfile};
pub use payment::Payment;
pub use service_item::{totals, ServiceItem};
pub use specialist::{Specialist, SpecialistStatus};
