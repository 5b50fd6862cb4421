//! SlotKey value object - the availability ledger key
//!
//! Bookings reference ledger entries by (specialist, date, slot), never by
//! row id: multiple bookings can claim or vacate the same key over time, so
//! the back-reference is a lookup, not an owning pointer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::SpecialistId;
use super::time_slot::TimeSlot;

/// One specialist's window on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub specialist_id: SpecialistId,
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

impl SlotKey {
    pub fn new(specialist_id: SpecialistId, date: NaiveDate, slot: TimeSlot) -> Self {
        Self {
            specialist_id,
            date,
            slot,
        }
    }

    /// Same specialist and date with a window overlapping `slot`
    pub fn blocks(&self, slot: &TimeSlot) -> bool {
        self.slot.overlaps(slot)
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.specialist_id, self.date, self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn key(start_h: u32, end_h: u32) -> SlotKey {
        let slot = TimeSlot::new(
            NaiveTime::from_hms_opt(start_h, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(end_h, 0, 0).unwrap(),
        )
        .unwrap();
        SlotKey::new(1, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), slot)
    }

    #[test]
    fn blocks_uses_slot_overlap() {
        let nine_to_ten = key(9, 10);
        assert!(nine_to_ten.blocks(&key(9, 11).slot));
        assert!(!nine_to_ten.blocks(&key(10, 11).slot));
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(key(9, 10).to_string(), "1/2026-03-02/09:00-10:00");
    }
}
