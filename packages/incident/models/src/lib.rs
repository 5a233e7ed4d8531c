#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record types and derived temporal features.
//!
//! This crate defines the canonical in-memory incident record produced by
//! the load step, along with the pure functions that derive its temporal
//! attributes (weekday, hour, month, season). Derived attributes are
//! computed once at construction and never written back to the store.

pub mod features;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Meteorological season, derived from the month of occurrence.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Season {
    /// December, January, February
    Winter,
    /// March, April, May
    Spring,
    /// June, July, August
    Summer,
    /// September, October, November
    Fall,
}

impl Season {
    /// All seasons in fixed presentation order.
    pub const ALL: &[Self] = &[Self::Winter, Self::Spring, Self::Summer, Self::Fall];

    /// Classifies a 1-based month into its season.
    ///
    /// Total over months 1-12: Winter {12, 1, 2}, Spring {3, 4, 5},
    /// Summer {6, 7, 8}, Fall {9, 10, 11}.
    #[must_use]
    pub const fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Self::Winter,
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            _ => Self::Fall,
        }
    }
}

/// A single point-located incident record.
///
/// Loaded from the incident store with non-null coordinates guaranteed by
/// the load query. The temporal fields after `longitude` are derived from
/// `occurred_at` at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Source case identifier (e.g. "JH123456").
    pub case_number: String,
    /// Timestamp of occurrence (naive local time, as recorded).
    pub occurred_at: NaiveDateTime,
    /// Year of occurrence as recorded in the store.
    pub year: i32,
    /// Free-text incident description.
    pub description: Option<String>,
    /// Free-text location type (e.g. "STREET", "APARTMENT").
    pub location_description: Option<String>,
    /// Latitude in degrees (WGS84).
    pub latitude: f64,
    /// Longitude in degrees (WGS84).
    pub longitude: f64,
    /// Derived: day of week of `occurred_at`.
    pub day: Weekday,
    /// Derived: hour of day, 0-23.
    pub hour: u32,
    /// Derived: 1-based month of `occurred_at`.
    pub month: u32,
    /// Derived: season of `occurred_at`.
    pub season: Season,
}

impl Incident {
    /// Builds an incident record, computing the derived temporal fields
    /// from `occurred_at`.
    #[must_use]
    pub fn new(
        case_number: String,
        occurred_at: NaiveDateTime,
        year: i32,
        description: Option<String>,
        location_description: Option<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            case_number,
            occurred_at,
            year,
            description,
            location_description,
            latitude,
            longitude,
            day: occurred_at.weekday(),
            hour: occurred_at.hour(),
            month: occurred_at.month(),
            season: Season::from_month(occurred_at.month()),
        }
    }

    /// Full weekday label ("Monday" .. "Sunday").
    #[must_use]
    pub const fn day_name(&self) -> &'static str {
        features::day_name(self.day)
    }

    /// Full month label ("January" .. "December").
    #[must_use]
    pub const fn month_name(&self) -> &'static str {
        features::month_name(self.month)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    #[test]
    fn derives_temporal_fields_at_construction() {
        // 2024-01-15 is a Monday
        let incident = Incident::new(
            "JH100001".to_string(),
            dt(2024, 1, 15, 14),
            2024,
            Some("FIRST DEGREE MURDER".to_string()),
            Some("STREET".to_string()),
            41.8781,
            -87.6298,
        );

        assert_eq!(incident.day, Weekday::Mon);
        assert_eq!(incident.day_name(), "Monday");
        assert_eq!(incident.hour, 14);
        assert_eq!(incident.month, 1);
        assert_eq!(incident.month_name(), "January");
        assert_eq!(incident.season, Season::Winter);
    }

    #[test]
    fn season_partitions_cover_all_months() {
        let expected = [
            (1, Season::Winter),
            (2, Season::Winter),
            (3, Season::Spring),
            (4, Season::Spring),
            (5, Season::Spring),
            (6, Season::Summer),
            (7, Season::Summer),
            (8, Season::Summer),
            (9, Season::Fall),
            (10, Season::Fall),
            (11, Season::Fall),
            (12, Season::Winter),
        ];

        for (month, season) in expected {
            assert_eq!(Season::from_month(month), season, "month {month}");
        }
    }

    #[test]
    fn season_display_labels() {
        let labels: Vec<String> = Season::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["Winter", "Spring", "Summer", "Fall"]);
    }
}
