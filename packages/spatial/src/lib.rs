#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Point-in-polygon boundary attribution and density aggregation.
//!
//! The aggregation loop is a plain iteration over incident points with an
//! injected [`BoundaryLookup`], so the containment strategy can be swapped
//! without touching the aggregation contract. [`LinearScan`] is the
//! default brute-force strategy; [`RTreeIndex`] answers the same queries
//! through an R-tree over polygon envelopes.
//!
//! Containment uses the `geo` crate's interior-only `Contains` predicate.
//! A point exactly on a shared edge between two polygons may therefore
//! match zero polygons; lookup is first-match-wins, so no point is ever
//! attributed twice.

use geo::{BoundingRect, Contains, MultiPolygon, Point};
use hotspot_map_geography_models::{Boundary, BoundaryStats};
use rstar::{AABB, RTree, RTreeObject};

/// Fixed scale factor applied to `count / area` when computing density.
///
/// Areas are in squared degrees, so raw quotients are tiny; the scale
/// brings them into a readable range.
pub const DENSITY_SCALE: f64 = 1e7;

/// Containment predicate over a loaded boundary set.
///
/// `locate` returns the index of the boundary containing the point, or
/// `None` if no boundary contains it. Implementations must agree on
/// attribution for non-overlapping boundary sets; for overlapping sets
/// the choice among containing boundaries is implementation-defined.
pub trait BoundaryLookup {
    /// Index of the boundary containing (`lng`, `lat`), if any.
    fn locate(&self, lng: f64, lat: f64) -> Option<usize>;
}

/// Brute-force containment scan over every boundary polygon.
///
/// O(N) per point with no index; acceptable at tens of boundaries and
/// thousands of points.
pub struct LinearScan<'a> {
    boundaries: &'a [Boundary],
}

impl<'a> LinearScan<'a> {
    /// Wraps a boundary slice without copying any geometry.
    #[must_use]
    pub const fn new(boundaries: &'a [Boundary]) -> Self {
        Self { boundaries }
    }
}

impl BoundaryLookup for LinearScan<'_> {
    fn locate(&self, lng: f64, lat: f64) -> Option<usize> {
        let point = Point::new(lng, lat);
        self.boundaries
            .iter()
            .position(|boundary| boundary.geometry.contains(&point))
    }
}

/// A boundary polygon stored in the R-tree with its slice index.
struct IndexedBoundary {
    index: usize,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl RTreeObject for IndexedBoundary {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree accelerated containment lookup.
///
/// Envelope candidates are confirmed with the same `Contains` predicate
/// as [`LinearScan`], so both strategies attribute identically for
/// non-overlapping boundary sets.
pub struct RTreeIndex {
    rtree: RTree<IndexedBoundary>,
}

impl RTreeIndex {
    /// Builds the index from a boundary slice. Geometry is cloned into
    /// the tree; indices refer back to the original slice.
    #[must_use]
    pub fn new(boundaries: &[Boundary]) -> Self {
        let entries = boundaries
            .iter()
            .enumerate()
            .map(|(index, boundary)| IndexedBoundary {
                index,
                envelope: compute_envelope(&boundary.geometry),
                polygon: boundary.geometry.clone(),
            })
            .collect();

        Self {
            rtree: RTree::bulk_load(entries),
        }
    }
}

impl BoundaryLookup for RTreeIndex {
    fn locate(&self, lng: f64, lat: f64) -> Option<usize> {
        let point = Point::new(lng, lat);
        let query_env = AABB::from_point([lng, lat]);

        self.rtree
            .locate_in_envelope_intersecting(&query_env)
            .find(|entry| entry.polygon.contains(&point))
            .map(|entry| entry.index)
    }
}

/// Counts contained points per boundary and computes density.
///
/// Points are (`lng`, `lat`) pairs. Each point increments at most one
/// boundary's count, so the count sum over all boundaries never exceeds
/// the point total. Density is `count / area * DENSITY_SCALE` with the
/// area in squared degrees; a zero-area geometry produces a non-finite
/// density rather than an error.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(
    boundaries: &[Boundary],
    points: &[(f64, f64)],
    lookup: &dyn BoundaryLookup,
) -> Vec<BoundaryStats> {
    let mut counts = vec![0u64; boundaries.len()];
    let mut unmatched = 0u64;

    for &(lng, lat) in points {
        match lookup.locate(lng, lat) {
            Some(index) => counts[index] += 1,
            None => unmatched += 1,
        }
    }

    if unmatched > 0 {
        log::debug!("{unmatched} of {} points fell outside every boundary", points.len());
    }

    boundaries
        .iter()
        .zip(counts)
        .map(|(boundary, incident_count)| BoundaryStats {
            name: boundary.name.clone(),
            incident_count,
            density: incident_count as f64 / boundary.area() * DENSITY_SCALE,
        })
        .collect()
}

/// Bounding box envelope for a [`MultiPolygon`].
fn compute_envelope(mp: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;

    fn square(name: &str, x0: f64, y0: f64) -> Boundary {
        Boundary {
            name: name.to_string(),
            geometry: MultiPolygon(vec![polygon![
                (x: x0, y: y0),
                (x: x0 + 1.0, y: y0),
                (x: x0 + 1.0, y: y0 + 1.0),
                (x: x0, y: y0 + 1.0),
            ]]),
        }
    }

    fn fixture() -> Vec<Boundary> {
        vec![square("WEST", 0.0, 0.0), square("EAST", 2.0, 0.0)]
    }

    #[test]
    fn linear_scan_attributes_points() {
        let boundaries = fixture();
        let scan = LinearScan::new(&boundaries);

        assert_eq!(scan.locate(0.5, 0.5), Some(0));
        assert_eq!(scan.locate(2.5, 0.5), Some(1));
        assert_eq!(scan.locate(1.5, 0.5), None);
    }

    #[test]
    fn rtree_agrees_with_linear_scan() {
        let boundaries = fixture();
        let scan = LinearScan::new(&boundaries);
        let rtree = RTreeIndex::new(&boundaries);

        let probes = [
            (0.5, 0.5),
            (2.5, 0.5),
            (1.5, 0.5),
            (0.999, 0.999),
            (-1.0, -1.0),
        ];
        for (lng, lat) in probes {
            assert_eq!(scan.locate(lng, lat), rtree.locate(lng, lat), "({lng}, {lat})");
        }
    }

    #[test]
    fn aggregate_counts_and_density() {
        let boundaries = fixture();
        let points = [(0.5, 0.5), (0.25, 0.75), (2.5, 0.5), (10.0, 10.0)];

        let stats = aggregate(&boundaries, &points, &LinearScan::new(&boundaries));

        assert_eq!(stats[0].incident_count, 2);
        assert_eq!(stats[1].incident_count, 1);
        // Unit squares: density is count * scale.
        assert!((stats[0].density - 2.0 * DENSITY_SCALE).abs() < 1e-6);
        assert!((stats[1].density - DENSITY_SCALE).abs() < 1e-6);
    }

    #[test]
    fn count_sum_never_exceeds_point_total() {
        let boundaries = fixture();
        let points = [(0.5, 0.5), (2.5, 0.5), (1.5, 0.5), (0.0, 0.0)];

        let stats = aggregate(&boundaries, &points, &LinearScan::new(&boundaries));

        let total: u64 = stats.iter().map(|s| s.incident_count).sum();
        assert!(total <= points.len() as u64);
    }

    #[test]
    fn empty_points_aggregate_to_zero_counts() {
        let boundaries = fixture();
        let stats = aggregate(&boundaries, &[], &LinearScan::new(&boundaries));

        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.incident_count == 0));
        assert!(stats.iter().all(|s| s.density.abs() < f64::EPSILON));
    }
}
