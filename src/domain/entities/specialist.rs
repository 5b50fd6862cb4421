//! Specialist entity

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::SpecialistId;

/// Whether a specialist is taking bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialistStatus {
    #[default]
    Active,
    Inactive,
}

/// A service specialist whose daily schedule owns availability entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialist {
    pub id: SpecialistId,
    pub name: String,
    pub status: SpecialistStatus,
}

impl Specialist {
    pub fn new(id: SpecialistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: SpecialistStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SpecialistStatus::Active
    }
}
