//! Notifier port - fire-and-forget outbound notifications
//!
//! Delivery failures are logged by the caller and never roll back a state
//! transition that already committed.

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{BookingId, TimeSlot};

/// What happened to the booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingEvent {
    Created,
    Updated,
    Confirmed,
    Cancelled,
    AutoCancelled,
    Expired,
    CheckedIn,
    CheckedOut,
}

/// One outbound message about a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Email address (customer) or specialist id rendered by the collaborator
    pub recipient: String,
    pub event: BookingEvent,
    pub booking_id: BookingId,
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// Abstract outbound notification channel
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification) -> Result<()>;
}

/// Notifier that drops everything; useful for tests and batch tooling
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: &Notification) -> Result<()> {
        Ok(())
    }
}
