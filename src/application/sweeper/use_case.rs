//! Expiry sweeper use case
//!
//! Two background policies keep the ledger honest:
//!
//! - stale-pending: a booking left Pending for too long is force-cancelled so
//!   its window goes back on sale
//! - past-date: any booking still active after its date has passed is
//!   force-cancelled during the nightly pass
//!
//! Force-cancel skips the notice-window check but runs through the same
//! store guard as user transitions, so a sweep racing a confirm settles in
//! whichever order the store serializes them. Both sweeps are idempotent:
//! the status filters exclude rows a previous pass already cancelled.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, Timelike};

use crate::config::SchedulingConfig;
use crate::domain::entities::Booking;
use crate::domain::ports::{BookingEvent, Catalog, Clock, Notification, Notifier, SchedulingStore};
use crate::domain::value_objects::BookingStatus;
use crate::error::BookingResult;

/// What one sweep pass did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Bookings force-cancelled by this pass
    pub swept: usize,
    /// Bookings that could not be transitioned; left for the next pass
    pub failed: usize,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.swept == 0 && self.failed == 0
    }
}

/// Background reclamation of abandoned and expired bookings
pub struct ExpirySweeper<S, C>
where
    S: SchedulingStore,
    C: Catalog,
{
    store: Arc<S>,
    catalog: Arc<C>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: SchedulingConfig,
}

impl<S, C> ExpirySweeper<S, C>
where
    S: SchedulingStore,
    C: Catalog,
{
    pub fn new(
        store: Arc<S>,
        catalog: Arc<C>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            notifier,
            clock,
            config,
        }
    }

    /// Cancel Pending bookings older than the configured staleness window
    pub fn sweep_stale_pending(&self) -> BookingResult<SweepReport> {
        let now = self.clock.now();
        let threshold = now - Duration::minutes(self.config.stale_pending_minutes);
        let stale = self.store.pending_created_before(threshold)?;

        let mut report = SweepReport::default();
        for booking in stale {
            match self.force_cancel(booking, BookingEvent::AutoCancelled) {
                Ok(()) => report.swept += 1,
                Err(err) => {
                    report.failed += 1;
                    tracing::error!("stale-pending sweep failed for a booking: {err}");
                }
            }
        }
        Ok(report)
    }

    /// Cancel bookings still active after their date has passed
    pub fn sweep_past_dates(&self) -> BookingResult<SweepReport> {
        let today = self.clock.today();
        let expired = self.store.active_before_date(today)?;

        let mut report = SweepReport::default();
        for booking in expired {
            match self.force_cancel(booking, BookingEvent::Expired) {
                Ok(()) => report.swept += 1,
                Err(err) => {
                    report.failed += 1;
                    tracing::error!("past-date sweep failed for a booking: {err}");
                }
            }
        }
        Ok(report)
    }

    fn force_cancel(&self, mut booking: Booking, event: BookingEvent) -> BookingResult<()> {
        let id = booking.id;
        booking.status = BookingStatus::Cancelled;
        booking.touch(self.clock.now());
        self.store.update_booking(&booking)?;
        self.store.release(&booking.slot_key(), id)?;
        tracing::info!(booking = id, ?event, date = %booking.date, slot = %booking.slot, "swept booking");
        self.notify(&booking, event);
        Ok(())
    }

    /// Blocking interval runner; returns when `shutdown` fires or its sender
    /// is dropped. Spawn on its own thread next to the request path.
    pub fn run(&self, shutdown: Receiver<()>) {
        let interval = StdDuration::from_secs(self.config.stale_sweep_interval_minutes * 60);
        let mut last_past_sweep: Option<NaiveDate> = None;

        loop {
            self.tick(&mut last_past_sweep);
            match shutdown.recv_timeout(interval) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
        tracing::debug!("sweeper stopped");
    }

    /// One scheduler beat: always the stale sweep, plus the daily past-date
    /// sweep once the configured local hour has passed
    fn tick(&self, last_past_sweep: &mut Option<NaiveDate>) {
        match self.sweep_stale_pending() {
            Ok(report) if !report.is_empty() => {
                tracing::info!(swept = report.swept, failed = report.failed, "stale-pending sweep");
            }
            Ok(_) => {}
            Err(err) => tracing::error!("stale-pending sweep aborted: {err}"),
        }

        let now = self.clock.now();
        let today = now.date();
        if now.hour() >= self.config.past_date_sweep_hour && *last_past_sweep != Some(today) {
            match self.sweep_past_dates() {
                Ok(report) => {
                    *last_past_sweep = Some(today);
                    if !report.is_empty() {
                        tracing::info!(swept = report.swept, failed = report.failed, "past-date sweep");
                    }
                }
                Err(err) => tracing::error!("past-date sweep aborted: {err}"),
            }
        }
    }

    fn notify(&self, booking: &Booking, event: BookingEvent) {
        let recipient = match self.catalog.customer(booking.customer_id) {
            Ok(Some(customer)) => customer.email,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(booking = booking.id, "customer lookup for sweep notice failed: {err:#}");
                return;
            }
        };
        let notification = Notification {
            recipient,
            event,
            booking_id: booking.id,
            date: booking.date,
            slot: booking.slot,
        };
        if let Err(err) = self.notifier.notify(&notification) {
            tracing::warn!(booking = booking.id, ?event, "sweep notice delivery failed: {err:#}");
        }
    }
}
