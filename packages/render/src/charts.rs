//! Plotly chart fragments for the analytics grid.
//!
//! Figures are built as plain JSON values (`data` traces plus `layout`)
//! and rendered into `<div>` + `Plotly.newPlot` blocks. Plotly itself
//! loads from CDN in the assembled document. Zero-valued datasets render
//! as zero-valued figures.

use hotspot_map_analytics::{hourly_counts, location_type_counts, season_shares, weekday_counts};
use hotspot_map_analytics_models::{HourlyCount, LabeledCount, SeasonShare};
use hotspot_map_incident_models::Incident;
use serde_json::{Value, json};

/// Number of location types shown in the location chart.
pub const TOP_LOCATIONS: usize = 10;

/// Fill color for the weekday and time-of-day traces.
const PRIMARY_COLOR: &str = "rgba(31, 119, 180, 0.7)";

/// Fill color for the location-type trace.
const SECONDARY_COLOR: &str = "rgba(255, 127, 14, 0.7)";

/// Slice colors for the seasonal donut, in Winter, Spring, Summer, Fall
/// order.
const SEASON_COLORS: [&str; 4] = ["#2980b9", "#27ae60", "#e74c3c", "#f39c12"];

fn base_layout(title: &str) -> Value {
    json!({
        "title": {"text": title, "x": 0.5, "xanchor": "center"},
        "paper_bgcolor": "white",
        "plot_bgcolor": "white",
        "height": 400
    })
}

/// Weekday bar chart, Monday-first.
#[must_use]
pub fn weekday_figure(rows: &[LabeledCount]) -> Value {
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    let counts: Vec<u64> = rows.iter().map(|r| r.count).collect();

    json!({
        "data": [{
            "type": "bar",
            "x": labels,
            "y": counts,
            "marker": {"color": PRIMARY_COLOR},
            "hovertemplate": "<b>%{x}</b><br>Homicides: %{y}<extra></extra>"
        }],
        "layout": base_layout("Homicides by Day of Week")
    })
}

/// Top location types as a horizontal bar chart, descending.
#[must_use]
pub fn location_figure(rows: &[LabeledCount]) -> Value {
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    let counts: Vec<u64> = rows.iter().map(|r| r.count).collect();

    let mut layout = base_layout("Top 10 Location Types");
    // Room for the location labels on the left.
    layout["margin"] = json!({"l": 200});

    json!({
        "data": [{
            "type": "bar",
            "x": counts,
            "y": labels,
            "orientation": "h",
            "marker": {"color": SECONDARY_COLOR},
            "hovertemplate": "<b>%{y}</b><br>Homicides: %{x}<extra></extra>"
        }],
        "layout": layout
    })
}

/// Time-of-day filled line chart over 24 hours.
#[must_use]
pub fn hour_figure(rows: &[HourlyCount]) -> Value {
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    let counts: Vec<u64> = rows.iter().map(|r| r.count).collect();

    let mut layout = base_layout("Homicides by Time of Day");
    layout["xaxis"] = json!({"tickangle": 45});

    json!({
        "data": [{
            "type": "scatter",
            "x": labels,
            "y": counts,
            "mode": "lines+markers",
            "fill": "tozeroy",
            "fillcolor": "rgba(31, 119, 180, 0.2)",
            "line": {"color": "rgb(31, 119, 180)", "width": 2},
            "hovertemplate": "<b>%{x}</b><br>Homicides: %{y}<extra></extra>"
        }],
        "layout": layout
    })
}

/// Seasonal donut chart with percentage labels.
#[must_use]
pub fn season_figure(rows: &[SeasonShare]) -> Value {
    let labels: Vec<String> = rows.iter().map(|r| r.season.to_string()).collect();
    let counts: Vec<u64> = rows.iter().map(|r| r.count).collect();

    json!({
        "data": [{
            "type": "pie",
            "labels": labels,
            "values": counts,
            "marker": {"colors": SEASON_COLORS},
            "textinfo": "label+percent",
            "hole": 0.4
        }],
        "layout": base_layout("Homicides by Season")
    })
}

/// Renders a figure into a `<div>` plus `Plotly.newPlot` script block.
#[must_use]
pub fn figure_div(id: &str, figure: &Value) -> String {
    format!(
        "<div id=\"{id}\"></div>\n<script>Plotly.newPlot('{id}', {data}, {layout});</script>",
        data = figure["data"],
        layout = figure["layout"],
    )
}

/// Computes the four distributions and renders the analytics grid.
#[must_use]
pub fn analytics_grid(incidents: &[Incident]) -> String {
    let cards = [
        figure_div("chart-dow", &weekday_figure(&weekday_counts(incidents))),
        figure_div(
            "chart-location",
            &location_figure(&location_type_counts(incidents, TOP_LOCATIONS)),
        ),
        figure_div("chart-time", &hour_figure(&hourly_counts(incidents))),
        figure_div("chart-season", &season_figure(&season_shares(incidents))),
    ];

    let card_divs: String = cards
        .iter()
        .map(|card| {
            format!(
                "        <div style=\"background-color: white; padding: 20px; border-radius: 12px; box-shadow: 0 4px 6px rgba(0,0,0,0.1);\">\n{card}\n        </div>\n"
            )
        })
        .collect();

    format!(
        "<div style=\"padding: 20px; background-color: #f5f5f5;\">\n    \
         <h2 style=\"text-align: center; color: #2c3e50; font-size: 32px; margin-bottom: 30px;\">\n        \
         Chicago Homicides Analytics Dashboard\n    </h2>\n    \
         <div style=\"display: grid; grid-template-columns: 1fr 1fr; gap: 25px; margin-top: 20px;\">\n{card_divs}    </div>\n</div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_figure_zero_filled_when_empty() {
        let figure = weekday_figure(&weekday_counts(&[]));

        let ys = figure["data"][0]["y"].as_array().unwrap();
        assert_eq!(ys.len(), 7);
        assert!(ys.iter().all(|v| v.as_u64() == Some(0)));
    }

    #[test]
    fn location_figure_is_horizontal() {
        let rows = vec![
            LabeledCount {
                label: "STREET".to_string(),
                count: 3,
            },
            LabeledCount {
                label: "ALLEY".to_string(),
                count: 1,
            },
        ];

        let figure = location_figure(&rows);

        assert_eq!(figure["data"][0]["orientation"], "h");
        assert_eq!(figure["data"][0]["y"][0], "STREET");
        assert_eq!(figure["layout"]["margin"]["l"], 200);
    }

    #[test]
    fn season_figure_uses_fixed_slice_order() {
        let figure = season_figure(&season_shares(&[]));

        let labels = figure["data"][0]["labels"].as_array().unwrap();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[0], "Winter");
        assert_eq!(labels[3], "Fall");
        assert_eq!(figure["data"][0]["hole"], 0.4);
    }

    #[test]
    fn figure_div_wires_plotly_call() {
        let figure = weekday_figure(&weekday_counts(&[]));
        let html = figure_div("chart-dow", &figure);

        assert!(html.contains("<div id=\"chart-dow\"></div>"));
        assert!(html.contains("Plotly.newPlot('chart-dow'"));
    }

    #[test]
    fn analytics_grid_contains_all_four_charts() {
        let html = analytics_grid(&[]);

        for id in ["chart-dow", "chart-location", "chart-time", "chart-season"] {
            assert!(html.contains(id), "{id}");
        }
        assert!(html.contains("Chicago Homicides Analytics Dashboard"));
    }
}
