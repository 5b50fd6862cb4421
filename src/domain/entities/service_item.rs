//! Service line item entity

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ServiceId;

/// A priced, timed salon service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: ServiceId,
    pub name: String,
    /// Price in minor currency units
    pub price: i64,
    pub duration_minutes: i64,
}

impl ServiceItem {
    pub fn new(id: ServiceId, name: impl Into<String>, price: i64, duration_minutes: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            duration_minutes,
        }
    }
}

/// Sum of prices and durations for a selection of services
pub fn totals(services: &[ServiceItem]) -> (i64, i64) {
    services
        .iter()
        .fold((0, 0), |(price, minutes), s| {
            (price + s.price, minutes + s.duration_minutes)
        })
}
