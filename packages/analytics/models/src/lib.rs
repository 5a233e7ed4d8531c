#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart dataset types.
//!
//! Aggregate rows produced by the analytics crate and consumed by the
//! chart renderer. These exist only transiently during chart
//! construction; nothing here is persisted.

use hotspot_map_incident_models::Season;
use serde::{Deserialize, Serialize};

/// Count of incidents for a single label (weekday, location type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledCount {
    /// Axis label.
    pub label: String,
    /// Incident count for the label.
    pub count: u64,
}

/// Count of incidents for one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyCount {
    /// Hour of day, 0-23.
    pub hour: u32,
    /// 12-hour clock label ("12 AM" .. "11 PM").
    pub label: String,
    /// Incident count for the hour.
    pub count: u64,
}

/// Count and share of incidents for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonShare {
    /// The season.
    pub season: Season,
    /// Incident count for the season.
    pub count: u64,
    /// Fraction of the total (0 when the collection is empty).
    pub share: f64,
}
