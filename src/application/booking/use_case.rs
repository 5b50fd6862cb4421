//! Booking lifecycle use case
//!
//! Orchestrates every guarded transition of the booking state machine:
//! create (registered or guest), update, cancel, staff-confirm, check-in,
//! check-out and administrative delete, plus the read queries and revenue
//! sums the reporting surface exposes.
//!
//! Invariant the whole file defends: no two active bookings overlap for the
//! same specialist, and a booking's ledger entry is released exactly when no
//! other active booking still claims its key. Occupancy is re-checked inside
//! `SchedulingStore::reserve`, so a pre-check that passed can still lose the
//! race and surface as `TimeSlotUnavailable`.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::config::SchedulingConfig;
use crate::domain::entities::{totals, Booking, Customer, GuestProfile, Specialist};
use crate::domain::ports::{
    BookingEvent, Catalog, Clock, Notification, Notifier, PaymentStore, SchedulingStore,
};
use crate::domain::services::{CheckoutGate, SpecialistSelector};
use crate::domain::value_objects::{
    Actor, BookingId, BookingStatus, Role, SlotKey, SpecialistId, TimeSlot,
};
use crate::error::{BookingError, BookingResult};

use super::request::BookingRequest;

/// Booking lifecycle engine, parameterized by its storage and catalog ports
pub struct BookingLifecycle<S, C>
where
    S: SchedulingStore,
    C: Catalog,
{
    store: Arc<S>,
    catalog: Arc<C>,
    payments: Arc<dyn PaymentStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: SchedulingConfig,
    selector: SpecialistSelector,
}

/// Outcome of request validation, shared by create and update
struct ValidatedRequest {
    total_price: i64,
    slot: TimeSlot,
}

impl<S, C> BookingLifecycle<S, C>
where
    S: SchedulingStore,
    C: Catalog,
{
    pub fn new(
        store: Arc<S>,
        catalog: Arc<C>,
        payments: Arc<dyn PaymentStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: SchedulingConfig,
    ) -> Self {
        let selector = SpecialistSelector::new(config.selection_policy);
        Self {
            store,
            catalog,
            payments,
            notifier,
            clock,
            config,
            selector,
        }
    }

    // === Create ===

    /// Create a booking for the calling customer
    pub fn create(&self, actor: &Actor, request: &BookingRequest) -> BookingResult<Booking> {
        let customer = self
            .catalog
            .customer(actor.id)?
            .ok_or(BookingError::CustomerNotFound { id: actor.id })?;
        self.create_for_customer(&customer, request)
    }

    /// Create a booking for a walk-in guest, creating or reusing a
    /// temporary guest profile keyed by email
    pub fn create_guest(
        &self,
        profile: GuestProfile,
        request: &BookingRequest,
    ) -> BookingResult<Booking> {
        profile.validate()?;
        let customer = match self.catalog.customer_by_email(profile.email.trim())? {
            Some(existing) if existing.is_guest() => existing,
            Some(existing) => {
                return Err(BookingError::CustomerExists {
                    email: existing.email,
                })
            }
            None => self.catalog.create_customer(profile.into_customer())?,
        };
        self.create_for_customer(&customer, request)
    }

    fn create_for_customer(
        &self,
        customer: &Customer,
        request: &BookingRequest,
    ) -> BookingResult<Booking> {
        let now = self.clock.now();
        let validated = self.validate_request(request, now)?;

        if self
            .store
            .customer_has_booking_at(customer.id, request.date, validated.slot, None)?
        {
            return Err(BookingError::BookingTimeConflict {
                customer: customer.id,
                date: request.date,
                slot: validated.slot.to_string(),
            });
        }

        let specialist = self.resolve_specialist(request.specialist, request.date, validated.slot, None)?;

        let key = SlotKey::new(specialist.id, request.date, validated.slot);
        if !self.store.reserve(&key, None)? {
            // Availability passed moments ago; a concurrent writer won
            return Err(BookingError::TimeSlotUnavailable {
                specialist: specialist.id,
                date: request.date,
                slot: validated.slot.to_string(),
            });
        }

        let booking = Booking::new(
            customer.id,
            specialist.id,
            request.service_ids.clone(),
            request.date,
            validated.slot,
            validated.total_price,
            now,
        );
        let booking = self.store.create_booking(booking)?;

        self.send(customer.email.clone(), BookingEvent::Created, &booking);
        self.notify_specialist(&booking, BookingEvent::Created);
        Ok(booking)
    }

    // === Update ===

    /// Re-validate and move a Pending/Confirmed booking, atomically moving
    /// its ledger reservation when the key changes
    pub fn update(
        &self,
        actor: &Actor,
        id: BookingId,
        request: &BookingRequest,
    ) -> BookingResult<Booking> {
        let mut booking = self.require_booking(id)?;
        if !matches!(
            booking.status,
            BookingStatus::Pending | BookingStatus::Confirmed
        ) {
            return Err(BookingError::BookingStatusInvalid {
                id,
                status: booking.status,
            });
        }
        self.authorize_owner(actor, &booking)?;

        let now = self.clock.now();
        let validated = self.validate_request(request, now)?;

        let old_key = booking.slot_key();
        let specialist = self.resolve_specialist(
            request.specialist,
            request.date,
            validated.slot,
            Some((&old_key, id)),
        )?;

        let new_key = SlotKey::new(specialist.id, request.date, validated.slot);
        if new_key != old_key {
            if self.store.customer_has_booking_at(
                booking.customer_id,
                request.date,
                validated.slot,
                Some(id),
            )? {
                return Err(BookingError::BookingTimeConflict {
                    customer: booking.customer_id,
                    date: request.date,
                    slot: validated.slot.to_string(),
                });
            }
            if !self.store.reserve(&new_key, Some(&old_key))? {
                return Err(BookingError::TimeSlotUnavailable {
                    specialist: specialist.id,
                    date: request.date,
                    slot: validated.slot.to_string(),
                });
            }
            // Only freed if no other active booking still claims it
            self.store.release(&old_key, id)?;
        }

        booking.specialist_id = specialist.id;
        booking.service_ids = request.service_ids.clone();
        booking.date = request.date;
        booking.slot = validated.slot;
        booking.total_price = validated.total_price;
        booking.touch(now);
        self.store.update_booking(&booking)?;

        self.notify_customer(&booking, BookingEvent::Updated);
        Ok(booking)
    }

    // === Cancel ===

    /// Cancel a Pending booking. Non-privileged actors must respect the
    /// minimum-notice window; staff may cancel regardless of timing.
    pub fn cancel(&self, actor: &Actor, id: BookingId) -> BookingResult<Booking> {
        let mut booking = self.require_booking(id)?;
        self.authorize_owner(actor, &booking)?;

        if booking.status != BookingStatus::Pending {
            return Err(BookingError::CannotCancel {
                id,
                status: booking.status,
            });
        }

        let now = self.clock.now();
        if !actor.is_privileged() {
            let remaining = booking.starts_at().signed_duration_since(now).num_hours();
            if remaining < self.config.min_cancel_notice_hours {
                return Err(BookingError::BookingCancelTimeExpired {
                    required: self.config.min_cancel_notice_hours,
                    remaining,
                });
            }
        }

        booking.status = BookingStatus::Cancelled;
        booking.touch(now);
        self.store.update_booking(&booking)?;
        self.store.release(&booking.slot_key(), id)?;

        self.notify_customer(&booking, BookingEvent::Cancelled);
        self.notify_specialist(&booking, BookingEvent::Cancelled);
        Ok(booking)
    }

    // === Staff transitions ===

    /// Staff-confirm: Pending -> Confirmed
    pub fn confirm(&self, actor: &Actor, id: BookingId) -> BookingResult<Booking> {
        self.require_privileged(actor)?;
        let mut booking = self.require_booking(id)?;
        if booking.status != BookingStatus::Pending {
            return Err(BookingError::BookingStatusInvalid {
                id,
                status: booking.status,
            });
        }
        booking.status = BookingStatus::Confirmed;
        booking.touch(self.clock.now());
        self.store.update_booking(&booking)?;
        self.notify_customer(&booking, BookingEvent::Confirmed);
        Ok(booking)
    }

    /// Check-in: Confirmed -> InProgress, stamping the arrival time
    pub fn check_in(&self, actor: &Actor, id: BookingId) -> BookingResult<Booking> {
        let mut booking = self.require_booking(id)?;
        self.authorize_desk(actor, &booking)?;
        if booking.status != BookingStatus::Confirmed {
            return Err(BookingError::BookingStatusInvalid {
                id,
                status: booking.status,
            });
        }
        let now = self.clock.now();
        booking.check_in_time = Some(now);
        booking.status = BookingStatus::InProgress;
        booking.touch(now);
        self.store.update_booking(&booking)?;
        self.notify_customer(&booking, BookingEvent::CheckedIn);
        Ok(booking)
    }

    /// Check-out: requires an in-progress booking with a prior check-in and
    /// a settled payment matching the booking total exactly. On refusal the
    /// booking stays InProgress.
    pub fn check_out(&self, actor: &Actor, id: BookingId) -> BookingResult<Booking> {
        let mut booking = self.require_booking(id)?;
        self.authorize_desk(actor, &booking)?;
        if booking.check_in_time.is_none() {
            return Err(BookingError::NotCheckedIn { id });
        }
        // Completed and Cancelled are terminal; a sweep may have cancelled
        // an in-progress booking after its check-in was stamped
        if !booking.status.can_transition_to(BookingStatus::Completed) {
            return Err(BookingError::BookingStatusInvalid {
                id,
                status: booking.status,
            });
        }

        let payment = self.payments.payment_for(id)?;
        let settled = CheckoutGate::validate(&booking, payment.as_ref())?;

        let now = self.clock.now();
        booking.payment_status = settled;
        booking.check_out_time = Some(now);
        booking.status = BookingStatus::Completed;
        booking.touch(now);
        self.store.update_booking(&booking)?;
        self.notify_customer(&booking, BookingEvent::CheckedOut);
        Ok(booking)
    }

    /// Administrative delete: unconditional removal, bypasses lifecycle
    /// guards. The ledger entry is still released so the slot cannot be
    /// blocked forever by a vanished booking.
    pub fn delete(&self, actor: &Actor, id: BookingId) -> BookingResult<()> {
        self.require_privileged(actor)?;
        let booking = self.require_booking(id)?;
        self.store.release(&booking.slot_key(), id)?;
        self.store.delete_booking(id)?;
        Ok(())
    }

    // === Queries ===

    pub fn booking(&self, id: BookingId) -> BookingResult<Booking> {
        self.require_booking(id)
    }

    pub fn all_bookings(&self) -> BookingResult<Vec<Booking>> {
        Ok(self.store.bookings()?)
    }

    /// Bookings owned by the calling customer
    pub fn bookings_for_customer(&self, actor: &Actor) -> BookingResult<Vec<Booking>> {
        Ok(self.store.bookings_by_customer(actor.id)?)
    }

    /// Bookings assigned to the calling specialist
    pub fn bookings_for_specialist(&self, actor: &Actor) -> BookingResult<Vec<Booking>> {
        if actor.role != Role::Specialist {
            return Err(BookingError::Unauthorized { actor: actor.id });
        }
        Ok(self.store.bookings_by_specialist(actor.id)?)
    }

    /// Confirmed and in-progress bookings (the day sheet)
    pub fn bookings_in_service(&self) -> BookingResult<Vec<Booking>> {
        Ok(self
            .store
            .bookings_with_status(&[BookingStatus::Confirmed, BookingStatus::InProgress])?)
    }

    // === Revenue (simple summation over COMPLETED bookings) ===

    pub fn revenue_for_day(&self, date: Option<NaiveDate>) -> BookingResult<i64> {
        let day = date.unwrap_or_else(|| self.clock.today());
        Ok(self.store.completed_revenue(day, day)?)
    }

    pub fn revenue_for_week(&self, date_in_week: Option<NaiveDate>) -> BookingResult<i64> {
        let day = date_in_week.unwrap_or_else(|| self.clock.today());
        let monday = day - Duration::days(day.weekday().num_days_from_monday() as i64);
        Ok(self.store.completed_revenue(monday, monday + Duration::days(6))?)
    }

    pub fn revenue_for_month(&self, year: i32, month: u32) -> BookingResult<i64> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(BookingError::InvalidDateRange)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or(BookingError::InvalidDateRange)?;
        let last = next_first.pred_opt().ok_or(BookingError::InvalidDateRange)?;
        Ok(self.store.completed_revenue(first, last)?)
    }

    pub fn revenue_in_range(&self, start: NaiveDate, end: NaiveDate) -> BookingResult<i64> {
        if start > end {
            return Err(BookingError::InvalidDateRange);
        }
        Ok(self.store.completed_revenue(start, end)?)
    }

    // === Internals ===

    fn require_booking(&self, id: BookingId) -> BookingResult<Booking> {
        self.store
            .booking(id)?
            .ok_or(BookingError::BookingNotFound { id })
    }

    fn require_privileged(&self, actor: &Actor) -> BookingResult<()> {
        if actor.is_privileged() {
            Ok(())
        } else {
            Err(BookingError::Unauthorized { actor: actor.id })
        }
    }

    /// Owner of the booking, or a privileged role
    fn authorize_owner(&self, actor: &Actor, booking: &Booking) -> BookingResult<()> {
        if actor.is_privileged() || actor.id == booking.customer_id {
            Ok(())
        } else {
            Err(BookingError::Unauthorized { actor: actor.id })
        }
    }

    /// Front-desk transitions: staff, or the assigned specialist
    fn authorize_desk(&self, actor: &Actor, booking: &Booking) -> BookingResult<()> {
        let assigned = actor.role == Role::Specialist && actor.id == booking.specialist_id;
        if actor.is_privileged() || assigned {
            Ok(())
        } else {
            Err(BookingError::Unauthorized { actor: actor.id })
        }
    }

    fn validate_request(
        &self,
        request: &BookingRequest,
        now: NaiveDateTime,
    ) -> BookingResult<ValidatedRequest> {
        if request.service_ids.is_empty() {
            return Err(BookingError::NoServices);
        }
        if request.service_ids.len() > self.config.max_services {
            return Err(BookingError::TooManyServices {
                count: request.service_ids.len(),
                max: self.config.max_services,
            });
        }

        let services = self.catalog.services(&request.service_ids)?;
        if let Some(missing) = request
            .service_ids
            .iter()
            .find(|id| !services.iter().any(|s| s.id == **id))
        {
            return Err(BookingError::ServiceNotFound { id: *missing });
        }

        let (total_price, total_minutes) = totals(&services);
        let slot = TimeSlot::compute(request.start_time, total_minutes, &self.config.hours())?;

        let starts_at = NaiveDateTime::new(request.date, request.start_time);
        if starts_at < now {
            return Err(BookingError::BookingDateInPast {
                date: request.date,
                start: request.start_time,
            });
        }
        if starts_at > now + Duration::days(self.config.max_advance_days) {
            return Err(BookingError::BookingDateTooFarInFuture {
                date: request.date,
                max_days: self.config.max_advance_days,
            });
        }

        Ok(ValidatedRequest { total_price, slot })
    }

    /// Resolve the requested specialist or auto-assign a free one.
    /// `prior` carries the booking's current key and id during update so
    /// its own reservation does not count against it.
    fn resolve_specialist(
        &self,
        requested: Option<SpecialistId>,
        date: NaiveDate,
        slot: TimeSlot,
        prior: Option<(&SlotKey, BookingId)>,
    ) -> BookingResult<Specialist> {
        match requested {
            Some(id) => {
                let specialist = self
                    .catalog
                    .specialist(id)?
                    .ok_or(BookingError::SpecialistNotFound { id })?;
                if !specialist.is_active() {
                    return Err(BookingError::SpecialistNotActive { id });
                }
                if !self.is_available(id, date, slot, prior)? {
                    return Err(BookingError::TimeSlotUnavailable {
                        specialist: id,
                        date,
                        slot: slot.to_string(),
                    });
                }
                Ok(specialist)
            }
            None => {
                let mut specialists = self.catalog.active_specialists()?;
                specialists.sort_by_key(|s| s.id);

                let mut candidates = Vec::new();
                for specialist in specialists {
                    if self.is_available(specialist.id, date, slot, prior)? {
                        let load = self.active_load(specialist.id, date)?;
                        candidates.push((specialist, load));
                    }
                }

                self.selector
                    .select(&candidates)
                    .ok_or(BookingError::NoAvailableSpecialist {
                        date,
                        slot: slot.to_string(),
                    })
            }
        }
    }

    /// True iff no ledger entry overlaps the window and no booking already
    /// claims the identical key
    fn is_available(
        &self,
        specialist: SpecialistId,
        date: NaiveDate,
        slot: TimeSlot,
        prior: Option<(&SlotKey, BookingId)>,
    ) -> BookingResult<bool> {
        let prior_key = prior.map(|(key, _)| *key);
        for entry in self.store.entries_for_day(specialist, date)? {
            if Some(entry.key) == prior_key {
                continue;
            }
            if entry.key.blocks(&slot) {
                return Ok(false);
            }
        }

        let key = SlotKey::new(specialist, date, slot);
        if self.store.slot_claimed(&key, prior.map(|(_, id)| id))? {
            return Ok(false);
        }
        Ok(true)
    }

    /// Active bookings this specialist holds on `date`
    fn active_load(&self, specialist: SpecialistId, date: NaiveDate) -> BookingResult<usize> {
        Ok(self
            .store
            .bookings_by_specialist(specialist)?
            .into_iter()
            .filter(|b| b.date == date && b.is_active())
            .count())
    }

    fn notify_customer(&self, booking: &Booking, event: BookingEvent) {
        match self.catalog.customer(booking.customer_id) {
            Ok(Some(customer)) => self.send(customer.email, event, booking),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(booking = booking.id, "customer lookup for notification failed: {err:#}");
            }
        }
    }

    fn notify_specialist(&self, booking: &Booking, event: BookingEvent) {
        self.send(
            format!("specialist:{}", booking.specialist_id),
            event,
            booking,
        );
    }

    /// Fire-and-forget: delivery failure never rolls back a committed
    /// transition
    fn send(&self, recipient: String, event: BookingEvent, booking: &Booking) {
        let notification = Notification {
            recipient,
            event,
            booking_id: booking.id,
            date: booking.date,
            slot: booking.slot,
        };
        if let Err(err) = self.notifier.notify(&notification) {
            tracing::warn!(booking = booking.id, ?event, "notification delivery failed: {err:#}");
        }
    }
}
