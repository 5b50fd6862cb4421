//! Booking request types

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ServiceId, SpecialistId};

/// Input for creating or updating a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// 1..=3 service ids; durations are summed to derive the slot
    pub service_ids: Vec<ServiceId>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    /// Staff-forced specialist; `None` auto-assigns
    pub specialist: Option<SpecialistId>,
}

impl BookingRequest {
    pub fn new(date: NaiveDate, start_time: NaiveTime, service_ids: Vec<ServiceId>) -> Self {
        Self {
            service_ids,
            date,
            start_time,
            specialist: None,
        }
    }

    pub fn with_specialist(mut self, specialist: SpecialistId) -> Self {
        self.specialist = Some(specialist);
        self
    }
}
