//! Dashboard map fragment: per-year cluster and heatmap layers.
//!
//! Emits a Leaflet map with one marker-cluster layer and one heatmap
//! layer per observed year, plus the control panel that drives layer
//! visibility (year filter and cluster/heatmap view toggle) client-side.
//! With no incidents the fragment is still a valid base map with an
//! empty layer set.

use std::collections::BTreeMap;

use hotspot_map_incident_models::Incident;
use serde_json::json;

use crate::escape_html;

/// Map center: Chicago.
pub const MAP_CENTER: [f64; 2] = [41.8781, -87.6298];

/// Initial zoom level.
pub const MAP_ZOOM: u32 = 11;

/// Heatmap point radius in pixels.
pub const HEAT_RADIUS: u32 = 15;

const MAP_TEMPLATE: &str = r#"<div id="map"></div>
<div id="control-panel" style="position: fixed; top: 10px; left: 50%; transform: translateX(-50%); z-index: 1000; background-color: white; padding: 10px; border-radius: 5px; box-shadow: 0px 0px 10px rgba(0,0,0,0.1);">
    <div style="margin-bottom: 10px;">
        <label for="yearSelect">Select Year:</label>
        <select id="yearSelect">
__YEAR_OPTIONS__
        </select>
        <button onclick="filterByYear()">Update Year</button>
    </div>
    <div>
        <button id="toggleButton" onclick="toggleViewMode()">Switch to Heatmap View</button>
    </div>
</div>
<script>
var map = L.map('map').setView([__CENTER__], __ZOOM__);
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
    maxZoom: 19,
    attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);

var clusterLayers = {};
var heatLayers = {};
__YEAR_LAYERS__
var isHeatmapMode = false;

function layerVisible(layer, visible) {
    if (visible && !map.hasLayer(layer)) {
        map.addLayer(layer);
    } else if (!visible && map.hasLayer(layer)) {
        map.removeLayer(layer);
    }
}

function updateLayers() {
    var selectedYear = document.getElementById('yearSelect').value;
    Object.keys(clusterLayers).forEach(function(year) {
        var yearMatch = selectedYear === 'all' || selectedYear === year;
        layerVisible(clusterLayers[year], yearMatch && !isHeatmapMode);
        layerVisible(heatLayers[year], yearMatch && isHeatmapMode);
    });
}

function filterByYear() {
    updateLayers();
}

function toggleViewMode() {
    isHeatmapMode = !isHeatmapMode;
    document.getElementById('toggleButton').textContent =
        isHeatmapMode ? 'Switch to Cluster View' : 'Switch to Heatmap View';
    updateLayers();
}

updateLayers();
</script>
"#;

const YEAR_LAYER_TEMPLATE: &str = r#"(function() {
    var markers = __MARKERS__;
    var cluster = L.markerClusterGroup();
    markers.forEach(function(m) {
        L.marker([m.lat, m.lng]).bindPopup(m.popup).addTo(cluster);
    });
    clusterLayers['__YEAR__'] = cluster;
    heatLayers['__YEAR__'] = L.heatLayer(__HEAT__, {radius: __RADIUS__});
})();
"#;

/// Distinct incident years, ascending.
#[must_use]
pub fn year_range(incidents: &[Incident]) -> Vec<i32> {
    let mut years: Vec<i32> = incidents.iter().map(|i| i.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Renders the dashboard map fragment (map div, control panel, script).
#[must_use]
pub fn dashboard_map(incidents: &[Incident]) -> String {
    let years = year_range(incidents);

    let mut by_year: BTreeMap<i32, Vec<&Incident>> = BTreeMap::new();
    for incident in incidents {
        by_year.entry(incident.year).or_default().push(incident);
    }

    let mut year_layers = String::new();
    let mut year_options = String::from("            <option value=\"all\">All Years</option>\n");
    for year in &years {
        let year_incidents = &by_year[year];
        year_layers.push_str(&year_layer(*year, year_incidents));
        year_options.push_str(&format!(
            "            <option value=\"{year}\">{year}</option>\n"
        ));
    }

    MAP_TEMPLATE
        .replace(
            "__CENTER__",
            &format!("{}, {}", MAP_CENTER[0], MAP_CENTER[1]),
        )
        .replace("__ZOOM__", &MAP_ZOOM.to_string())
        .replace("__YEAR_OPTIONS__", year_options.trim_end())
        .replace("__YEAR_LAYERS__", &year_layers)
}

/// Renders one year's cluster and heatmap layer registration block.
fn year_layer(year: i32, incidents: &[&Incident]) -> String {
    let markers: Vec<serde_json::Value> = incidents
        .iter()
        .map(|incident| {
            json!({
                "lat": incident.latitude,
                "lng": incident.longitude,
                "popup": popup_html(incident),
            })
        })
        .collect();

    let heat: Vec<[f64; 2]> = incidents
        .iter()
        .map(|incident| [incident.latitude, incident.longitude])
        .collect();

    YEAR_LAYER_TEMPLATE
        .replace("__MARKERS__", &serde_json::Value::Array(markers).to_string())
        .replace("__HEAT__", &json!(heat).to_string())
        .replace("__RADIUS__", &HEAT_RADIUS.to_string())
        .replace("__YEAR__", &year.to_string())
}

/// Popup body for a single incident marker.
fn popup_html(incident: &Incident) -> String {
    format!(
        "Case Number: {}<br>Date: {}<br>Description: {}",
        escape_html(&incident.case_number),
        incident.occurred_at.format("%Y-%m-%d %H:%M:%S"),
        escape_html(incident.description.as_deref().unwrap_or("")),
    )
}
