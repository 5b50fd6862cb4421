//! Booking lifecycle use case

pub mod request;
pub mod use_case;


pub use request::BookingRequest;
pub use use_case::BookingLifecycle;
