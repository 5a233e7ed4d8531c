//! Boundary feed fetcher.
//!
//! Fetches a `GeoJSON` `FeatureCollection` from a URL that returns it
//! directly. One attempt only; a failure here aborts the pipeline before
//! any output is written.

use hotspot_map_geography_models::Boundary;

use crate::GeoError;

/// Fetches and parses all boundary polygons from a direct `GeoJSON` URL.
///
/// # Errors
///
/// Returns [`GeoError`] if the request fails, returns a non-success
/// status, or the response is not a parseable `FeatureCollection`.
pub async fn fetch_boundaries(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<Boundary>, GeoError> {
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(GeoError::Conversion {
            message: format!("Boundary request failed with status {}", resp.status()),
        });
    }
    let body = resp.text().await?;

    let boundaries = crate::parse::parse_boundaries(&body)?;
    log::info!("Fetched {} boundary polygons", boundaries.len());

    Ok(boundaries)
}
