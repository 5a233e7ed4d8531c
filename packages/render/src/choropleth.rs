//! Choropleth hotspot map document.
//!
//! Renders the boundary polygons shaded by incident density on a
//! five-stop linear color scale, with per-region tooltips, a fixed
//! legend, an all-incident heatmap overlay, and a layer control. The
//! output is a complete standalone HTML document.

use hotspot_map_geography_models::{Boundary, BoundaryStats};
use hotspot_map_incident_models::Incident;
use serde_json::json;

use crate::map::{HEAT_RADIUS, MAP_CENTER, MAP_ZOOM};

/// Five-stop density color scale, low to high.
pub const DENSITY_COLORS: [&str; 5] = ["#fee5d9", "#fcae91", "#fb6a4a", "#de2d26", "#a50f15"];

/// Heatmap blur in pixels.
pub const HEAT_BLUR: u32 = 10;

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Chicago Crime Hotspots</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" referrerpolicy="no-referrer" />
    <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
    <script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
    <style>
        body { margin: 0; padding: 0; font-family: Arial, sans-serif; }
        #map { height: 100vh; width: 100%; }
        .boundary-tooltip {
            background-color: #F0EFEF;
            border: 2px solid black;
            border-radius: 3px;
        }
    </style>
</head>
<body>
<div id="map"></div>
<div style="position: fixed; bottom: 50px; left: 50px; width: 150px; border: 2px solid grey; z-index: 9999; font-size: 14px; background-color: white; padding: 10px; border-radius: 5px;">
    <p style="margin-top: 0; margin-bottom: 5px;"><b>Crime Density</b></p>
    <p style="margin: 0;">
    Very High<br>
    High<br>
    Medium<br>
    Low<br>
    Very Low
    </p>
</div>
<script>
var map = L.map('map').setView([__CENTER__], __ZOOM__);
L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png', {
    maxZoom: 19,
    attribution: '&copy; OpenStreetMap contributors &copy; CARTO'
}).addTo(map);

var boundaries = __FEATURES__;
var vmin = __VMIN__;
var vmax = __VMAX__;
var colors = __COLORS__;

function lerpChannel(a, b, t) {
    return Math.round(a + (b - a) * t);
}

function lerpColor(a, b, t) {
    var pa = [parseInt(a.slice(1, 3), 16), parseInt(a.slice(3, 5), 16), parseInt(a.slice(5, 7), 16)];
    var pb = [parseInt(b.slice(1, 3), 16), parseInt(b.slice(3, 5), 16), parseInt(b.slice(5, 7), 16)];
    return '#' + pa.map(function(c, i) {
        return lerpChannel(c, pb[i], t).toString(16).padStart(2, '0');
    }).join('');
}

function densityColor(density) {
    if (!isFinite(density)) {
        return colors[colors.length - 1];
    }
    var t = vmax > vmin ? (density - vmin) / (vmax - vmin) : 0;
    t = Math.min(1, Math.max(0, t));
    var scaled = t * (colors.length - 1);
    var i = Math.floor(scaled);
    if (i >= colors.length - 1) {
        return colors[colors.length - 1];
    }
    return lerpColor(colors[i], colors[i + 1], scaled - i);
}

var densityLayer = L.geoJSON(boundaries, {
    style: function(feature) {
        return {
            fillColor: densityColor(feature.properties.crime_density),
            color: 'black',
            weight: 1,
            fillOpacity: 0.7
        };
    },
    onEachFeature: function(feature, layer) {
        layer.bindTooltip(
            '<b>Neighborhood:</b> ' + feature.properties.community +
            '<br><b>Total Incidents:</b> ' + feature.properties.crime_count +
            '<br><b>Crime Density:</b> ' + feature.properties.crime_density.toFixed(2),
            {sticky: false, className: 'boundary-tooltip'}
        );
    }
}).addTo(map);

var heatLayer = L.heatLayer(__HEAT__, {radius: __RADIUS__, blur: __BLUR__}).addTo(map);

L.control.layers(null, {
    'Crime Density': densityLayer,
    'Heatmap': heatLayer
}).addTo(map);
</script>
</body>
</html>
"#;

/// Renders the full choropleth document.
///
/// `boundaries` and `stats` are index-aligned, as produced by the
/// spatial aggregation; `incidents` feed the heatmap overlay.
#[must_use]
pub fn choropleth_document(
    boundaries: &[Boundary],
    stats: &[BoundaryStats],
    incidents: &[Incident],
) -> String {
    let features: Vec<serde_json::Value> = boundaries
        .iter()
        .zip(stats)
        .map(|(boundary, stat)| {
            let geometry = geojson::Geometry::new(geojson::Value::from(&boundary.geometry));
            json!({
                "type": "Feature",
                "properties": {
                    "community": stat.name,
                    "crime_count": stat.incident_count,
                    "crime_density": stat.density,
                },
                "geometry": geometry,
            })
        })
        .collect();

    let (vmin, vmax) = density_range(stats);

    let heat: Vec<[f64; 2]> = incidents
        .iter()
        .map(|incident| [incident.latitude, incident.longitude])
        .collect();

    DOCUMENT_TEMPLATE
        .replace(
            "__CENTER__",
            &format!("{}, {}", MAP_CENTER[0], MAP_CENTER[1]),
        )
        .replace("__ZOOM__", &MAP_ZOOM.to_string())
        .replace(
            "__FEATURES__",
            &json!({"type": "FeatureCollection", "features": features}).to_string(),
        )
        .replace("__VMIN__", &json!(vmin).to_string())
        .replace("__VMAX__", &json!(vmax).to_string())
        .replace("__COLORS__", &json!(DENSITY_COLORS).to_string())
        .replace("__HEAT__", &json!(heat).to_string())
        .replace("__RADIUS__", &HEAT_RADIUS.to_string())
        .replace("__BLUR__", &HEAT_BLUR.to_string())
}

/// Observed density range over finite values; (0, 0) when empty.
fn density_range(stats: &[BoundaryStats]) -> (f64, f64) {
    let mut range: Option<(f64, f64)> = None;
    for stat in stats {
        if !stat.density.is_finite() {
            continue;
        }
        range = Some(match range {
            None => (stat.density, stat.density),
            Some((lo, hi)) => (lo.min(stat.density), hi.max(stat.density)),
        });
    }
    range.unwrap_or((0.0, 0.0))
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, polygon};

    use super::*;

    fn fixture() -> (Vec<Boundary>, Vec<BoundaryStats>) {
        let boundaries = vec![Boundary {
            name: "AUSTIN".to_string(),
            geometry: MultiPolygon(vec![polygon![
                (x: -87.7, y: 41.8),
                (x: -87.6, y: 41.8),
                (x: -87.6, y: 41.9),
                (x: -87.7, y: 41.9),
            ]]),
        }];
        let stats = vec![BoundaryStats {
            name: "AUSTIN".to_string(),
            incident_count: 4,
            density: 12.5,
        }];
        (boundaries, stats)
    }

    #[test]
    fn renders_features_legend_and_controls() {
        let (boundaries, stats) = fixture();

        let html = choropleth_document(&boundaries, &stats, &[]);

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("\"community\":\"AUSTIN\""));
        assert!(html.contains("Very High"));
        assert!(html.contains("L.control.layers"));
        assert!(html.contains("basemaps.cartocdn.com"));
    }

    #[test]
    fn empty_stats_fall_back_to_zero_range() {
        let html = choropleth_document(&[], &[], &[]);

        assert!(html.contains("var vmin = 0.0;"));
        assert!(html.contains("var vmax = 0.0;"));
        assert!(html.contains("\"features\":[]"));
    }

    #[test]
    fn density_range_ignores_non_finite_values() {
        let stats = vec![
            BoundaryStats {
                name: "A".to_string(),
                incident_count: 1,
                density: f64::INFINITY,
            },
            BoundaryStats {
                name: "B".to_string(),
                incident_count: 2,
                density: 3.0,
            },
        ];

        assert_eq!(density_range(&stats), (3.0, 3.0));
    }
}
