//! Checkout consistency gate
//!
//! The one place external payment state is trusted to finalize money-bearing
//! state. Pure: reads the booking and the attached payment, decides, mutates
//! nothing.

use crate::domain::entities::{Booking, Payment};
use crate::domain::value_objects::PaymentStatus;
use crate::error::{BookingError, BookingResult};

/// Guard that validates a settled payment before completion
pub struct CheckoutGate;

impl CheckoutGate {
    /// Returns the payment status to copy onto the booking, or the reason
    /// checkout must be refused. Amount must match exactly - no tolerance,
    /// no rounding.
    pub fn validate(booking: &Booking, payment: Option<&Payment>) -> BookingResult<PaymentStatus> {
        let payment = payment.ok_or(BookingError::PaymentNotFound {
            booking: booking.id,
        })?;

        if !payment.status.is_settled() {
            return Err(BookingError::PaymentNotCompleted {
                booking: booking.id,
                status: payment.status,
            });
        }

        if payment.amount != booking.total_price {
            return Err(BookingError::PaymentAmountMismatch {
                expected: booking.total_price,
                paid: payment.amount,
            });
        }

        Ok(payment.status)
    }
}
