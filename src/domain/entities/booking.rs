//! Booking entity - the aggregate the lifecycle state machine mutates

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    BookingId, BookingStatus, CustomerId, PaymentStatus, ServiceId, SlotKey, SpecialistId,
    TimeSlot,
};

/// A reserved appointment for one customer with one specialist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub customer_id: CustomerId,
    pub specialist_id: SpecialistId,
    /// 1..=3 service line items, priced at creation/update time
    pub service_ids: Vec<ServiceId>,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    /// Sum of the selected services' prices, in minor currency units
    pub total_price: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub check_in_time: Option<NaiveDateTime>,
    pub check_out_time: Option<NaiveDateTime>,
}

impl Booking {
    /// A fresh Pending booking. The store assigns the id on insert.
    pub fn new(
        customer_id: CustomerId,
        specialist_id: SpecialistId,
        service_ids: Vec<ServiceId>,
        date: NaiveDate,
        slot: TimeSlot,
        total_price: i64,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: 0,
            customer_id,
            specialist_id,
            service_ids,
            date,
            slot,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            total_price,
            created_at: now,
            updated_at: now,
            check_in_time: None,
            check_out_time: None,
        }
    }

    /// The availability-ledger key this booking claims while active
    pub fn slot_key(&self) -> SlotKey {
        SlotKey::new(self.specialist_id, self.date, self.slot)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Wall-clock start of the appointment
    pub fn starts_at(&self) -> NaiveDateTime {
        NaiveDateTime::new(self.date, self.slot.start())
    }

    /// Stamp `updated_at`; every successful transition calls this
    pub fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = now;
    }
}
