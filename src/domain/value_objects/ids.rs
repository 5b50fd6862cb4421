//! Identifier aliases shared across the domain

pub type BookingId = u64;
pub type CustomerId = u64;
pub type SpecialistId = u64;
pub type ServiceId = u64;
