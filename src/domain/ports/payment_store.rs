//! PaymentStore port - read-only view of the payment subsystem

use anyhow::Result;

use crate::domain::entities::Payment;
use crate::domain::value_objects::BookingId;

/// Lookup of settlement records; the write path belongs to the payment
/// subsystem and is never exercised by this engine
pub trait PaymentStore: Send + Sync {
    fn payment_for(&self, booking: BookingId) -> Result<Option<Payment>>;
}
