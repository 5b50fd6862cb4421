//! In-memory storage backend
//!
//! One `Mutex` guards bookings, ledger entries, the catalog and payments
//! together, which is what makes `reserve` and `release` genuinely atomic:
//! the occupancy check and the entry write happen under the same guard. A
//! poisoned lock is recovered by taking the inner data; every write here
//! leaves the maps structurally valid, so a panicking peer cannot corrupt
//! them.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::entities::{AvailabilityEntry, Booking, Customer, Payment, ServiceItem, Specialist};
use crate::domain::ports::{Catalog, PaymentStore, SchedulingStore};
use crate::domain::value_objects::{
    BookingId, BookingStatus, CustomerId, ServiceId, SlotKey, SpecialistId, TimeSlot,
};

#[derive(Default)]
struct Inner {
    bookings: BTreeMap<BookingId, Booking>,
    entries: BTreeMap<SlotKey, AvailabilityEntry>,
    services: BTreeMap<ServiceId, ServiceItem>,
    specialists: BTreeMap<SpecialistId, Specialist>,
    customers: BTreeMap<CustomerId, Customer>,
    payments: HashMap<BookingId, Payment>,
    next_booking_id: BookingId,
    next_customer_id: CustomerId,
}

/// All-in-one in-memory backend implementing every storage port
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    // Seeding helpers for wiring up a salon

    pub fn add_service(&self, service: ServiceItem) {
        self.lock().services.insert(service.id, service);
    }

    pub fn add_specialist(&self, specialist: Specialist) {
        self.lock().specialists.insert(specialist.id, specialist);
    }

    pub fn add_customer(&self, customer: Customer) {
        let mut inner = self.lock();
        inner.next_customer_id = inner.next_customer_id.max(customer.id);
        inner.customers.insert(customer.id, customer);
    }

    pub fn put_payment(&self, payment: Payment) {
        self.lock().payments.insert(payment.booking_id, payment);
    }
}

impl SchedulingStore for MemoryStore {
    fn create_booking(&self, mut booking: Booking) -> Result<Booking> {
        let mut inner = self.lock();
        inner.next_booking_id += 1;
        booking.id = inner.next_booking_id;
        inner.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    fn booking(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self.lock().bookings.get(&id).cloned())
    }

    fn update_booking(&self, booking: &Booking) -> Result<()> {
        let mut inner = self.lock();
        if !inner.bookings.contains_key(&booking.id) {
            bail!("booking {} not found", booking.id);
        }
        inner.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    fn delete_booking(&self, id: BookingId) -> Result<()> {
        if self.lock().bookings.remove(&id).is_none() {
            bail!("booking {id} not found");
        }
        Ok(())
    }

    fn bookings(&self) -> Result<Vec<Booking>> {
        Ok(self.lock().bookings.values().cloned().collect())
    }

    fn bookings_by_customer(&self, customer: CustomerId) -> Result<Vec<Booking>> {
        Ok(self
            .lock()
            .bookings
            .values()
            .filter(|b| b.customer_id == customer)
            .cloned()
            .collect())
    }

    fn bookings_by_specialist(&self, specialist: SpecialistId) -> Result<Vec<Booking>> {
        Ok(self
            .lock()
            .bookings
            .values()
            .filter(|b| b.specialist_id == specialist)
            .cloned()
            .collect())
    }

    fn bookings_with_status(&self, statuses: &[BookingStatus]) -> Result<Vec<Booking>> {
        Ok(self
            .lock()
            .bookings
            .values()
            .filter(|b| statuses.contains(&b.status))
            .cloned()
            .collect())
    }

    fn pending_created_before(&self, threshold: NaiveDateTime) -> Result<Vec<Booking>> {
        Ok(self
            .lock()
            .bookings
            .values()
            .filter(|b| b.status == BookingStatus::Pending && b.created_at < threshold)
            .cloned()
            .collect())
    }

    fn active_before_date(&self, date: NaiveDate) -> Result<Vec<Booking>> {
        Ok(self
            .lock()
            .bookings
            .values()
            .filter(|b| b.is_active() && b.date < date)
            .cloned()
            .collect())
    }

    fn customer_has_booking_at(
        &self,
        customer: CustomerId,
        date: NaiveDate,
        slot: TimeSlot,
        excluding: Option<BookingId>,
    ) -> Result<bool> {
        Ok(self.lock().bookings.values().any(|b| {
            b.customer_id == customer
                && b.date == date
                && b.slot == slot
                && b.is_active()
                && excluding != Some(b.id)
        }))
    }

    fn entries_for_day(&self, specialist: SpecialistId, date: NaiveDate) -> Result<Vec<AvailabilityEntry>> {
        Ok(self
            .lock()
            .entries
            .values()
            .filter(|e| e.key.specialist_id == specialist && e.key.date == date)
            .cloned()
            .collect())
    }

    fn slot_claimed(&self, key: &SlotKey, excluding: Option<BookingId>) -> Result<bool> {
        Ok(self
            .lock()
            .bookings
            .values()
            .any(|b| b.is_active() && b.slot_key() == *key && excluding != Some(b.id)))
    }

    fn reserve(&self, key: &SlotKey, vacating: Option<&SlotKey>) -> Result<bool> {
        let mut inner = self.lock();
        let blocked = inner.entries.values().any(|e| {
            e.key.specialist_id == key.specialist_id
                && e.key.date == key.date
                && Some(&e.key) != vacating
                && e.key.blocks(&key.slot)
        });
        if blocked {
            return Ok(false);
        }
        inner.entries.insert(*key, AvailabilityEntry::occupied(*key));
        Ok(true)
    }

    fn release(&self, key: &SlotKey, excluding: BookingId) -> Result<bool> {
        let mut inner = self.lock();
        let still_claimed = inner.bookings.values().any(|b| {
            b.id != excluding
                && matches!(b.status, BookingStatus::Pending | BookingStatus::Confirmed)
                && b.slot_key() == *key
        });
        if still_claimed {
            return Ok(false);
        }
        Ok(inner.entries.remove(key).is_some())
    }

    fn completed_revenue(&self, from: NaiveDate, to: NaiveDate) -> Result<i64> {
        Ok(self
            .lock()
            .bookings
            .values()
            .filter(|b| b.status == BookingStatus::Completed && b.date >= from && b.date <= to)
            .map(|b| b.total_price)
            .sum())
    }
}

impl Catalog for MemoryStore {
    fn services(&self, ids: &[ServiceId]) -> Result<Vec<ServiceItem>> {
        let inner = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| inner.services.get(id).cloned())
            .collect())
    }

    fn specialist(&self, id: SpecialistId) -> Result<Option<Specialist>> {
        Ok(self.lock().specialists.get(&id).cloned())
    }

    fn active_specialists(&self) -> Result<Vec<Specialist>> {
        // BTreeMap iteration already yields ascending ids
        Ok(self
            .lock()
            .specialists
            .values()
            .filter(|s| s.is_active())
            .cloned()
            .collect())
    }

    fn customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.lock().customers.get(&id).cloned())
    }

    fn customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        Ok(self
            .lock()
            .customers
            .values()
            .find(|c| c.email == email)
            .cloned())
    }

    fn create_customer(&self, mut customer: Customer) -> Result<Customer> {
        let mut inner = self.lock();
        inner.next_customer_id += 1;
        customer.id = inner.next_customer_id;
        inner.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }
}

impl PaymentStore for MemoryStore {
    fn payment_for(&self, booking: BookingId) -> Result<Option<Payment>> {
        Ok(self.lock().payments.get(&booking).cloned())
    }
}
