#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Categorical and temporal incident distributions.
//!
//! Each public function is one group-and-count aggregation with a fixed
//! presentation order, matching one chart in the analytics grid. All
//! functions are pure folds over the loaded incident collection; an empty
//! collection yields zero-valued datasets rather than an error.

use std::collections::BTreeMap;

use hotspot_map_analytics_models::{HourlyCount, LabeledCount, SeasonShare};
use hotspot_map_geography_models::BoundaryStats;
use hotspot_map_incident_models::features::{DAY_NAMES, hour_label};
use hotspot_map_incident_models::{Incident, Season};

/// Incident counts per weekday, Monday-first, zero-filled.
#[must_use]
pub fn weekday_counts(incidents: &[Incident]) -> Vec<LabeledCount> {
    let mut counts = [0u64; 7];
    for incident in incidents {
        counts[incident.day.num_days_from_monday() as usize] += 1;
    }

    DAY_NAMES
        .iter()
        .zip(counts)
        .map(|(label, count)| LabeledCount {
            label: (*label).to_string(),
            count,
        })
        .collect()
}

/// Incident counts per location type, descending, truncated to `top_n`.
///
/// Incidents without a location description are excluded. Ties are broken
/// alphabetically so the output is deterministic.
#[must_use]
pub fn location_type_counts(incidents: &[Incident], top_n: usize) -> Vec<LabeledCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for incident in incidents {
        if let Some(location) = incident.location_description.as_deref() {
            *counts.entry(location).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<LabeledCount> = counts
        .into_iter()
        .map(|(label, count)| LabeledCount {
            label: label.to_string(),
            count,
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    rows.truncate(top_n);
    rows
}

/// Incident counts per hour of day, 0-23, with 12-hour clock labels.
#[must_use]
pub fn hourly_counts(incidents: &[Incident]) -> Vec<HourlyCount> {
    let mut counts = [0u64; 24];
    for incident in incidents {
        counts[incident.hour as usize % 24] += 1;
    }

    (0u32..24)
        .zip(counts)
        .map(|(hour, count)| HourlyCount {
            hour,
            label: hour_label(hour),
            count,
        })
        .collect()
}

/// Incident counts and shares per season, in fixed Winter, Spring,
/// Summer, Fall order. Shares are zero for an empty collection.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn season_shares(incidents: &[Incident]) -> Vec<SeasonShare> {
    let mut counts: BTreeMap<Season, u64> = BTreeMap::new();
    for incident in incidents {
        *counts.entry(incident.season).or_insert(0) += 1;
    }

    let total: u64 = counts.values().sum();

    Season::ALL
        .iter()
        .map(|&season| {
            let count = counts.get(&season).copied().unwrap_or(0);
            let share = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            };
            SeasonShare {
                season,
                count,
                share,
            }
        })
        .collect()
}

/// Boundaries ranked by incident count, descending, truncated to `top_n`.
///
/// Used for the post-run neighborhood statistics table.
#[must_use]
pub fn rank_boundaries(stats: &[BoundaryStats], top_n: usize) -> Vec<BoundaryStats> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| {
        b.incident_count
            .cmp(&a.incident_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(top_n);
    ranked
}
