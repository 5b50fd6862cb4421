//! Specialist auto-assignment
//!
//! Pure selection over a pre-filtered candidate list. The caller (the booking
//! use case) supplies only specialists that are ACTIVE and free for the
//! requested window, paired with their active-booking load for that day; the
//! selector applies the configured tie-break policy. Candidates are always
//! ranked in ascending-id order first so conflict behavior stays
//! reproducible.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Specialist;

/// How the auto-assigner breaks ties between free specialists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Lowest id wins (the historical behavior)
    #[default]
    FirstAvailable,
    /// Fewest active bookings that day wins; lowest id breaks ties
    LeastLoaded,
}

/// Picks one specialist from the available candidates
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialistSelector {
    policy: SelectionPolicy,
}

impl SpecialistSelector {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    /// Select from `(specialist, active load)` pairs; `None` when empty
    pub fn select(&self, candidates: &[(Specialist, usize)]) -> Option<Specialist> {
        match self.policy {
            SelectionPolicy::FirstAvailable => candidates
                .iter()
                .min_by_key(|(s, _)| s.id)
                .map(|(s, _)| s.clone()),
            SelectionPolicy::LeastLoaded => candidates
                .iter()
                .min_by_key(|(s, load)| (*load, s.id))
                .map(|(s, _)| s.clone()),
        }
    }
}
