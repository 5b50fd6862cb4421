//! Application Layer
//!
//! Use cases orchestrating the domain through its ports:
//!
//! - `booking/` - the lifecycle engine (create, update, cancel, confirm,
//!   check-in, check-out, delete, queries, revenue)
//! - `sweeper/` - background reclamation of stale and expired bookings

pub mod booking;
pub mod sweeper;

pub use booking::{BookingLifecycle, BookingRequest};
pub use sweeper::{ExpirySweeper, SweepReport};
