//! Payment reference
//!
//! Owned by the payment subsystem; the engine only reads it to enforce the
//! checkout gate.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{BookingId, PaymentStatus};

/// A settlement record attached to a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub booking_id: BookingId,
    /// Amount in minor currency units
    pub amount: i64,
    pub method: String,
    pub transaction_id: String,
    pub status: PaymentStatus,
    pub paid_at: Option<NaiveDateTime>,
}

impl Payment {
    pub fn settled(
        booking_id: BookingId,
        amount: i64,
        transaction_id: impl Into<String>,
        paid_at: NaiveDateTime,
    ) -> Self {
        Self {
            booking_id,
            amount,
            method: "gateway".to_string(),
            transaction_id: transaction_id.into(),
            status: PaymentStatus::Success,
            paid_at: Some(paid_at),
        }
    }
}
