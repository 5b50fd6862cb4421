//! Availability ledger entry
//!
//! One reserved or blocked window for one specialist on one date. Entries are
//! created and deleted as a side effect of booking transitions, never
//! directly by a caller.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::SlotKey;

/// One occupied window in a specialist's daily schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub key: SlotKey,
    pub occupied: bool,
}

impl AvailabilityEntry {
    pub fn occupied(key: SlotKey) -> Self {
        Self {
            key,
            occupied: true,
        }
    }
}
