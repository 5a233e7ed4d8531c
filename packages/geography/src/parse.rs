//! `GeoJSON` feature collection parsing.
//!
//! Converts the boundary feed's `FeatureCollection` into [`Boundary`]
//! values. Handles both `Polygon` and `MultiPolygon` geometry types;
//! single polygons are promoted to one-element multi-polygons so the
//! rest of the system deals with a single geometry type.

use geo::MultiPolygon;
use geojson::GeoJson;
use hotspot_map_geography_models::Boundary;

use crate::GeoError;

/// Property key carrying the region name in the community areas feed.
const NAME_PROPERTY: &str = "community";

/// Parses a `GeoJSON` `FeatureCollection` into boundary polygons.
///
/// Features without a usable name or geometry are skipped with a
/// warning; an unparseable document is an error.
///
/// # Errors
///
/// Returns [`GeoError`] if the document is not valid `GeoJSON` or is not
/// a `FeatureCollection`.
pub fn parse_boundaries(raw: &str) -> Result<Vec<Boundary>, GeoError> {
    let geojson: GeoJson = raw.parse().map_err(|e| GeoError::Conversion {
        message: format!("Failed to parse GeoJSON response: {e}"),
    })?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeoError::Conversion {
            message: "Expected a GeoJSON FeatureCollection".to_string(),
        });
    };

    let mut boundaries = Vec::new();
    for feature in collection.features {
        let Some(name) = feature
            .properties
            .as_ref()
            .and_then(|props| props.get(NAME_PROPERTY))
            .and_then(serde_json::Value::as_str)
        else {
            log::warn!("Skipping boundary feature without a {NAME_PROPERTY} property");
            continue;
        };

        let Some(geometry) = feature.geometry.and_then(to_multi_polygon) else {
            log::warn!("Failed to parse geometry for boundary {name}");
            continue;
        };

        boundaries.push(Boundary {
            name: name.to_string(),
            geometry,
        });
    }

    Ok(boundaries)
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`], promoting
/// single polygons. Non-areal geometries yield `None`.
fn to_multi_polygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"community": "AUSTIN", "area_numbe": "25"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-87.7, 41.8], [-87.6, 41.8], [-87.6, 41.9], [-87.7, 41.9], [-87.7, 41.8]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"community": "OHARE"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[-87.9, 41.9], [-87.8, 41.9], [-87.8, 42.0], [-87.9, 42.0], [-87.9, 41.9]]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"community": "POINTVILLE"},
                "geometry": {"type": "Point", "coordinates": [-87.6, 41.8]}
            },
            {
                "type": "Feature",
                "properties": {"area_numbe": "99"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-87.5, 41.8], [-87.4, 41.8], [-87.4, 41.9], [-87.5, 41.9], [-87.5, 41.8]]]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let boundaries = parse_boundaries(FIXTURE).unwrap();

        let names: Vec<&str> = boundaries.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["AUSTIN", "OHARE"]);
        assert_eq!(boundaries[0].geometry.0.len(), 1);
    }

    #[test]
    fn skips_non_areal_and_unnamed_features() {
        let boundaries = parse_boundaries(FIXTURE).unwrap();
        assert!(boundaries.iter().all(|b| b.name != "POINTVILLE"));
        assert_eq!(boundaries.len(), 2);
    }

    #[test]
    fn rejects_malformed_document() {
        assert!(parse_boundaries("{not geojson").is_err());
    }

    #[test]
    fn rejects_bare_geometry_document() {
        let raw = r#"{"type": "Point", "coordinates": [-87.6, 41.8]}"#;
        assert!(parse_boundaries(raw).is_err());
    }
}
