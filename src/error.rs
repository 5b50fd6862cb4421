//! Error types for Marcel
//!
//! Uses `thiserror` for the library error enum. Every failure a lifecycle
//! operation can surface is a variant here; `ErrorKind` groups them into the
//! coarse categories callers branch on (HTTP mapping, retry decisions).

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::domain::value_objects::{BookingStatus, PaymentStatus};

/// Result type alias for Marcel operations
pub type BookingResult<T> = Result<T, BookingError>;

/// Main error type for scheduling and lifecycle operations
#[derive(Error, Debug)]
pub enum BookingError {
    /// A requested service id does not exist in the catalog
    #[error("service {id} does not exist")]
    ServiceNotFound { id: u64 },

    /// A booking must carry at least one service
    #[error("a booking must include at least one service")]
    NoServices,

    /// Too many services on one booking
    #[error("a booking may include at most {max} services (got {count})")]
    TooManyServices { count: usize, max: usize },

    /// Computed slot duration is zero or negative
    #[error("slot duration must be positive (got {minutes} minutes)")]
    InvalidDuration { minutes: i64 },

    /// Slot falls outside business hours
    #[error("slot {start}-{end} is outside business hours {opening}-{closing}")]
    OutOfHours {
        start: NaiveTime,
        end: NaiveTime,
        opening: NaiveTime,
        closing: NaiveTime,
    },

    /// A slot string could not be parsed as "HH:MM-HH:MM"
    #[error("invalid time slot '{value}' - expected HH:MM-HH:MM")]
    InvalidSlotFormat { value: String },

    /// Booking start lies in the past
    #[error("booking date {date} {start} is in the past")]
    BookingDateInPast { date: NaiveDate, start: NaiveTime },

    /// Booking start lies beyond the advance window
    #[error("booking date {date} is more than {max_days} days ahead")]
    BookingDateTooFarInFuture { date: NaiveDate, max_days: i64 },

    /// The customer already holds a booking on this date and slot
    #[error("customer {customer} already has a booking on {date} at {slot}")]
    BookingTimeConflict {
        customer: u64,
        date: NaiveDate,
        slot: String,
    },

    /// Unknown specialist id
    #[error("specialist {id} does not exist")]
    SpecialistNotFound { id: u64 },

    /// Specialist exists but is not taking bookings
    #[error("specialist {id} is not active")]
    SpecialistNotActive { id: u64 },

    /// The requested specialist is booked for that window
    #[error("specialist {specialist} is unavailable on {date} at {slot}")]
    TimeSlotUnavailable {
        specialist: u64,
        date: NaiveDate,
        slot: String,
    },

    /// No active specialist is free for the window
    #[error("no specialist is available on {date} at {slot}")]
    NoAvailableSpecialist { date: NaiveDate, slot: String },

    /// Unknown booking id
    #[error("booking {id} does not exist")]
    BookingNotFound { id: u64 },

    /// Unknown customer id
    #[error("customer {id} does not exist")]
    CustomerNotFound { id: u64 },

    /// A registered (non-guest) account already owns this email
    #[error("a registered account already exists for '{email}'")]
    CustomerExists { email: String },

    /// Transition attempted from the wrong status
    #[error("booking {id} is {status} - operation not allowed in this state")]
    BookingStatusInvalid { id: u64, status: BookingStatus },

    /// Cancel attempted on a booking past the Pending stage
    #[error("booking {id} is {status} and can no longer be cancelled")]
    CannotCancel { id: u64, status: BookingStatus },

    /// Cancel attempted inside the minimum-notice window
    #[error("cancellation requires {required} hours notice ({remaining} remaining)")]
    BookingCancelTimeExpired { required: i64, remaining: i64 },

    /// Check-out attempted before check-in
    #[error("booking {id} has not been checked in")]
    NotCheckedIn { id: u64 },

    /// Actor lacks the role or ownership for the operation
    #[error("actor {actor} is not authorized for this operation")]
    Unauthorized { actor: u64 },

    /// No payment attached at check-out
    #[error("no payment found for booking {booking}")]
    PaymentNotFound { booking: u64 },

    /// Payment attached but not settled
    #[error("payment for booking {booking} is {status}, not settled")]
    PaymentNotCompleted {
        booking: u64,
        status: PaymentStatus,
    },

    /// Settled amount differs from the booking total
    #[error("payment amount {paid} does not match booking total {expected}")]
    PaymentAmountMismatch { expected: i64, paid: i64 },

    /// Missing or backwards revenue range
    #[error("invalid date range")]
    InvalidDateRange,

    /// Guest profile carries an empty name
    #[error("guest name must not be empty")]
    InvalidGuestName,

    /// Guest profile carries a missing or malformed email
    #[error("guest email '{email}' is not valid")]
    InvalidGuestEmail { email: String },

    /// Config file error
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error (config loading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage-layer failure
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Coarse classification of a [`BookingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input shape or range; rejected before any mutation
    Validation,
    /// Time-slot or customer double-booking; nothing written
    Conflict,
    /// Transition attempted from the wrong status; booking untouched
    State,
    /// Unknown booking/specialist/service/customer id
    NotFound,
    /// Actor lacks role or ownership
    Authorization,
    /// Missing, incomplete or mismatched payment at check-out
    PaymentInconsistency,
    /// Storage or configuration failure
    Storage,
}

impl BookingError {
    /// Classify this error into the coarse taxonomy
    pub fn kind(&self) -> ErrorKind {
        use BookingError::*;
        match self {
            NoServices
            | TooManyServices { .. }
            | InvalidDuration { .. }
            | OutOfHours { .. }
            | InvalidSlotFormat { .. }
            | BookingDateInPast { .. }
            | BookingDateTooFarInFuture { .. }
            | InvalidDateRange
            | InvalidGuestName
            | InvalidGuestEmail { .. } => ErrorKind::Validation,

            BookingTimeConflict { .. }
            | TimeSlotUnavailable { .. }
            | NoAvailableSpecialist { .. }
            | CustomerExists { .. }
            | SpecialistNotActive { .. } => ErrorKind::Conflict,

            BookingStatusInvalid { .. }
            | CannotCancel { .. }
            | BookingCancelTimeExpired { .. }
            | NotCheckedIn { .. } => ErrorKind::State,

            ServiceNotFound { .. }
            | SpecialistNotFound { .. }
            | BookingNotFound { .. }
            | CustomerNotFound { .. } => ErrorKind::NotFound,

            Unauthorized { .. } => ErrorKind::Authorization,

            PaymentNotFound { .. }
            | PaymentNotCompleted { .. }
            | PaymentAmountMismatch { .. } => ErrorKind::PaymentInconsistency,

            Config(_) | Io(_) | Storage(_) => ErrorKind::Storage,
        }
    }
}
