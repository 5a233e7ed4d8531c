//! Dashboard document assembly and output writing.
//!
//! Concatenates the rendered map fragment and analytics grid into one
//! fixed-layout document (map above, analytics below). The file write
//! happens only after the whole document string exists, so a failed run
//! never leaves a partial document behind.

use std::path::Path;

use crate::RenderError;

const DASHBOARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Chicago Homicides Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-latest.min.js"></script>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" referrerpolicy="no-referrer" />
    <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
    <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.css" />
    <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.Default.css" />
    <script src="https://unpkg.com/leaflet.markercluster@1.4.1/dist/leaflet.markercluster.js"></script>
    <script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
    <style>
        body {
            margin: 0;
            padding: 0;
            font-family: Arial, sans-serif;
        }
        #map-container {
            position: relative;
            height: 600px;
            width: 100%;
            margin-bottom: 20px;
            z-index: 1;
        }
        #map {
            position: absolute;
            top: 0;
            left: 0;
            right: 0;
            bottom: 0;
        }
        #analytics-container {
            position: relative;
            z-index: 2;
            background-color: #f5f5f5;
        }
    </style>
</head>
<body>
    <div id="map-container">
__MAP__
    </div>
    <div id="analytics-container">
__ANALYTICS__
    </div>
</body>
</html>
"#;

/// Assembles the dashboard document from its rendered fragments.
#[must_use]
pub fn assemble_dashboard(map_fragment: &str, analytics_html: &str) -> String {
    DASHBOARD_TEMPLATE
        .replace("__MAP__", map_fragment)
        .replace("__ANALYTICS__", analytics_html)
}

/// Writes a rendered document, overwriting any existing file.
///
/// # Errors
///
/// Returns [`RenderError`] if the write fails.
pub fn write_document(path: &Path, contents: &str) -> Result<(), RenderError> {
    std::fs::write(path, contents)?;
    log::info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_map_above_analytics() {
        let html = assemble_dashboard("<div id=\"map\"></div>", "<div id=\"grid\"></div>");

        let map_pos = html.find("id=\"map\"").unwrap();
        let grid_pos = html.find("id=\"grid\"").unwrap();
        assert!(map_pos < grid_pos);
        assert!(html.contains("cdn.plot.ly"));
        assert!(html.contains("leaflet.markercluster"));
    }

    #[test]
    fn write_overwrites_existing_file() {
        let path = std::env::temp_dir().join("hotspot_map_render_write_test.html");

        write_document(&path, "first").unwrap();
        write_document(&path, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        std::fs::remove_file(&path).unwrap();
    }
}
