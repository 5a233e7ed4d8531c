#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Community area boundary fetching and parsing.
//!
//! Downloads the boundary polygon `GeoJSON` feed with a single request
//! (no retry, per the batch pipeline's fail-fast contract) and converts
//! it into [`Boundary`] values. Features whose geometry cannot be parsed
//! are skipped with a warning rather than failing the run.
//!
//! [`Boundary`]: hotspot_map_geography_models::Boundary

pub mod fetch;
pub mod parse;

use thiserror::Error;

/// Chicago community areas `GeoJSON` export endpoint.
pub const COMMUNITY_AREAS_URL: &str =
    "https://data.cityofchicago.org/api/geospatial/cauq-8yn6?method=export&format=GeoJSON";

/// Errors that can occur while loading boundary data.
#[derive(Debug, Error)]
pub enum GeoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Data conversion or extraction error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
