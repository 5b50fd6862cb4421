//! SchedulingStore port - storage for bookings and the availability ledger
//!
//! One trait covers both aggregates because the atomicity contract spans
//! them: `reserve` and `release` must be check-then-write under the store's
//! own exclusion (a uniqueness constraint plus transaction, or one lock).
//! Use-case code never composes two store calls expecting them to be atomic
//! together.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::entities::{AvailabilityEntry, Booking};
use crate::domain::value_objects::{BookingId, BookingStatus, CustomerId, SlotKey, SpecialistId, TimeSlot};

/// Abstract storage for bookings and availability entries
pub trait SchedulingStore: Send + Sync {
    /// Insert a new booking, assigning its id; returns the stored copy
    fn create_booking(&self, booking: Booking) -> Result<Booking>;

    fn booking(&self, id: BookingId) -> Result<Option<Booking>>;

    /// Overwrite an existing booking row
    fn update_booking(&self, booking: &Booking) -> Result<()>;

    /// Remove a booking row outright (administrative delete)
    fn delete_booking(&self, id: BookingId) -> Result<()>;

    fn bookings(&self) -> Result<Vec<Booking>>;

    fn bookings_by_customer(&self, customer: CustomerId) -> Result<Vec<Booking>>;

    fn bookings_by_specialist(&self, specialist: SpecialistId) -> Result<Vec<Booking>>;

    fn bookings_with_status(&self, statuses: &[BookingStatus]) -> Result<Vec<Booking>>;

    /// Pending bookings created strictly before `threshold`
    fn pending_created_before(&self, threshold: NaiveDateTime) -> Result<Vec<Booking>>;

    /// Active bookings dated strictly before `date`
    fn active_before_date(&self, date: NaiveDate) -> Result<Vec<Booking>>;

    /// Whether the customer holds an active booking at exactly this
    /// date+slot, ignoring `excluding` when given
    fn customer_has_booking_at(
        &self,
        customer: CustomerId,
        date: NaiveDate,
        slot: TimeSlot,
        excluding: Option<BookingId>,
    ) -> Result<bool>;

    /// Ledger entries for one specialist's day
    fn entries_for_day(&self, specialist: SpecialistId, date: NaiveDate) -> Result<Vec<AvailabilityEntry>>;

    /// Whether any active booking already claims exactly this key, ignoring
    /// `excluding` when given
    fn slot_claimed(&self, key: &SlotKey, excluding: Option<BookingId>) -> Result<bool>;

    /// Atomically re-check occupancy and insert an occupied entry for `key`.
    /// Returns false when an overlapping entry already exists (the caller
    /// lost the race). `vacating` names a key whose entry is about to be
    /// released by the same transition (a booking moving its own slot) and
    /// is ignored during the check.
    fn reserve(&self, key: &SlotKey, vacating: Option<&SlotKey>) -> Result<bool>;

    /// Delete the entry for `key` unless a booking other than `excluding`,
    /// in status PENDING or CONFIRMED, still references it. Returns true
    /// when the entry was removed.
    fn release(&self, key: &SlotKey, excluding: BookingId) -> Result<bool>;

    /// Sum of `total_price` over COMPLETED bookings dated within
    /// `[from, to]` inclusive
    fn completed_revenue(&self, from: NaiveDate, to: NaiveDate) -> Result<i64>;
}
