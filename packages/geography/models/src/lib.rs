#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary polygon and density annotation types.
//!
//! These types represent the named geographic regions (community areas)
//! that incidents are aggregated into. Boundaries are loaded once per run
//! and never modified; aggregation produces a separate [`BoundaryStats`]
//! annotation per boundary rather than mutating the polygon itself.

use geo::{Area, MultiPolygon};
use serde::{Deserialize, Serialize};

/// A named geographic region with its polygon geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// Region name as published by the boundary feed (e.g. "AUSTIN").
    pub name: String,
    /// Region geometry. Single polygons are promoted to a one-element
    /// multi-polygon at parse time.
    pub geometry: MultiPolygon<f64>,
}

impl Boundary {
    /// Planar area of the geometry in squared degrees.
    ///
    /// Matches the coordinate-space area the density constant was
    /// calibrated against; not a surface area in physical units.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.geometry.unsigned_area()
    }
}

/// Aggregation result for one boundary.
///
/// Produced by the spatial aggregation step; the source [`Boundary`] at
/// the same index is left untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryStats {
    /// Region name, copied from the boundary.
    pub name: String,
    /// Number of incidents whose point lies within the boundary geometry.
    pub incident_count: u64,
    /// `incident_count / area * scale`. Unguarded against zero-area
    /// geometries; a degenerate polygon is a data defect upstream.
    pub density: f64,
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;

    #[test]
    fn unit_square_area() {
        let boundary = Boundary {
            name: "UNIT".to_string(),
            geometry: MultiPolygon(vec![polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
                (x: 0.0, y: 1.0),
            ]]),
        };

        assert!((boundary.area() - 1.0).abs() < 1e-12);
    }
}
