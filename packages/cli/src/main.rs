#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! CLI for generating the homicide dashboard and hotspot map documents.
//!
//! Each subcommand runs one fixed pipeline end-to-end: load incidents
//! (and, for hotspots, fetch boundary polygons), aggregate, render, and
//! write a standalone HTML document. Failures are logged and re-raised,
//! terminating the process with a non-zero status; no output file is
//! written for a run that fails before assembly completes.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use hotspot_map_geography::COMMUNITY_AREAS_URL;
use hotspot_map_geography_models::BoundaryStats;
use hotspot_map_incident_models::Incident;
use hotspot_map_render::{charts, choropleth, document, map};
use hotspot_map_spatial::LinearScan;

/// Output file for the clustered/heatmap dashboard.
const DASHBOARD_OUTPUT: &str = "chicago_homicides_dashboard.html";

/// Output file for the choropleth hotspot map.
const HOTSPOTS_OUTPUT: &str = "chicago_crime_hotspots.html";

#[derive(Parser)]
#[command(name = "hotspot_map_cli", about = "Homicide mapping and analytics tool")]
struct Cli {
    /// Path to the incident `DuckDB` store.
    #[arg(long, default_value = "data/homicides.duckdb")]
    database: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the per-year cluster/heatmap dashboard with analytics charts
    Dashboard,
    /// Generate the choropleth hotspot map from neighborhood boundaries
    Hotspots,
    /// Generate both documents
    All,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let result = run(&cli).await;

    if let Err(e) = &result {
        log::error!("Run failed: {e}");
    }

    result
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Dashboard => run_dashboard(&cli.database),
        Commands::Hotspots => run_hotspots(&cli.database).await,
        Commands::All => {
            run_dashboard(&cli.database)?;
            run_hotspots(&cli.database).await
        }
    }
}

/// Loads all located incidents; the store connection is scoped to this
/// call and released on every path.
fn load_incidents(db_path: &Path) -> Result<Vec<Incident>, hotspot_map_database::DbError> {
    let conn = hotspot_map_database::open(db_path)?;
    hotspot_map_database::queries::load_incidents(&conn)
}

/// Runs the dashboard pipeline: load, render map and charts, assemble,
/// write.
fn run_dashboard(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Loading incident data...");
    let incidents = load_incidents(db_path)?;

    log::info!("Creating map...");
    let map_fragment = map::dashboard_map(&incidents);

    log::info!("Creating analytics...");
    let analytics_html = charts::analytics_grid(&incidents);

    log::info!("Saving dashboard...");
    let dashboard = document::assemble_dashboard(&map_fragment, &analytics_html);
    document::write_document(Path::new(DASHBOARD_OUTPUT), &dashboard)?;

    println!("Dashboard has been saved as {DASHBOARD_OUTPUT}");
    Ok(())
}

/// Runs the hotspots pipeline: fetch boundaries, load incidents,
/// aggregate, render, write, then print the top-10 table.
async fn run_hotspots(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Loading neighborhood boundaries...");
    let client = reqwest::Client::new();
    let boundaries =
        hotspot_map_geography::fetch::fetch_boundaries(&client, COMMUNITY_AREAS_URL).await?;

    log::info!("Loading incident data...");
    let incidents = load_incidents(db_path)?;

    log::info!("Analyzing crime patterns...");
    let points: Vec<(f64, f64)> = incidents
        .iter()
        .map(|incident| (incident.longitude, incident.latitude))
        .collect();
    let stats =
        hotspot_map_spatial::aggregate(&boundaries, &points, &LinearScan::new(&boundaries));

    log::info!("Creating choropleth map...");
    let hotspots = choropleth::choropleth_document(&boundaries, &stats, &incidents);
    document::write_document(Path::new(HOTSPOTS_OUTPUT), &hotspots)?;

    print_top_neighborhoods(&stats);
    println!("Map saved as {HOTSPOTS_OUTPUT}");
    Ok(())
}

/// Prints the top neighborhoods by incident count to standard output.
fn print_top_neighborhoods(stats: &[BoundaryStats]) {
    let ranked = hotspot_map_analytics::rank_boundaries(stats, 10);

    println!();
    println!("Top 10 Neighborhoods by Crime Count:");
    println!("{:<30} {:>10} {:>14}", "community", "count", "density");
    for stat in ranked {
        println!(
            "{:<30} {:>10} {:>14.2}",
            stat.name, stat.incident_count, stat.density
        );
    }
}
