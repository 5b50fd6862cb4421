//! Scheduling configuration
//!
//! All policy knobs in one place, loadable from a TOML file with serde
//! defaults so a partial config stays valid:
//!
//! ```toml
//! opening = "08:00:00"
//! closing = "20:00:00"
//! max_advance_days = 7
//! selection_policy = "least_loaded"
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::services::SelectionPolicy;
use crate::domain::value_objects::BusinessHours;
use crate::error::BookingResult;

/// Policy knobs for the scheduling engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Earliest slot start
    #[serde(default = "default_opening")]
    pub opening: NaiveTime,

    /// Latest slot end
    #[serde(default = "default_closing")]
    pub closing: NaiveTime,

    /// How many days ahead a booking may be placed
    #[serde(default = "default_max_advance_days")]
    pub max_advance_days: i64,

    /// Maximum services on a single booking
    #[serde(default = "default_max_services")]
    pub max_services: usize,

    /// Minimum notice (hours) for a non-privileged cancel
    #[serde(default = "default_min_cancel_notice_hours")]
    pub min_cancel_notice_hours: i64,

    /// Age (minutes) after which an unconfirmed Pending booking is swept
    #[serde(default = "default_stale_pending_minutes")]
    pub stale_pending_minutes: i64,

    /// Interval (minutes) between stale-pending sweeps
    #[serde(default = "default_stale_sweep_interval_minutes")]
    pub stale_sweep_interval_minutes: u64,

    /// Local hour after which the daily past-date sweep runs
    #[serde(default = "default_past_date_sweep_hour")]
    pub past_date_sweep_hour: u32,

    /// How the auto-assigner breaks ties between free specialists
    #[serde(default)]
    pub selection_policy: SelectionPolicy,
}

fn default_opening() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).unwrap()
}

fn default_closing() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap()
}

fn default_max_advance_days() -> i64 {
    7
}

fn default_max_services() -> usize {
    3
}

fn default_min_cancel_notice_hours() -> i64 {
    12
}

fn default_stale_pending_minutes() -> i64 {
    30
}

fn default_stale_sweep_interval_minutes() -> u64 {
    5
}

fn default_past_date_sweep_hour() -> u32 {
    1
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            opening: default_opening(),
            closing: default_closing(),
            max_advance_days: default_max_advance_days(),
            max_services: default_max_services(),
            min_cancel_notice_hours: default_min_cancel_notice_hours(),
            stale_pending_minutes: default_stale_pending_minutes(),
            stale_sweep_interval_minutes: default_stale_sweep_interval_minutes(),
            past_date_sweep_hour: default_past_date_sweep_hour(),
            selection_policy: SelectionPolicy::default(),
        }
    }
}

impl SchedulingConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BookingResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> BookingResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The business-hours window slots must fall inside
    pub fn hours(&self) -> BusinessHours {
        BusinessHours {
            opening: self.opening,
            closing: self.closing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_salon_policy() {
        let config = SchedulingConfig::default();
        assert_eq!(config.opening, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(config.closing, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(config.max_advance_days, 7);
        assert_eq!(config.max_services, 3);
        assert_eq!(config.min_cancel_notice_hours, 12);
        assert_eq!(config.stale_pending_minutes, 30);
        assert_eq!(config.selection_policy, SelectionPolicy::FirstAvailable);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SchedulingConfig::from_toml_str(
            r#"
            opening = "09:00:00"
            selection_policy = "least_loaded"
            "#,
        )
        .unwrap();
        assert_eq!(config.opening, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(config.closing, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(config.selection_policy, SelectionPolicy::LeastLoaded);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config = SchedulingConfig::from_toml_str("").unwrap();
        assert_eq!(config.max_advance_days, 7);
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(SchedulingConfig::from_toml_str("opening = 8").is_err());
    }
}
