#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map and chart rendering into self-contained HTML.
//!
//! Produces Leaflet-based map fragments (marker clusters, heatmaps,
//! choropleth shading) and Plotly chart fragments, then assembles them
//! into standalone documents. All third-party assets load from CDNs so
//! the output files need no server.
//!
//! Rendering itself never touches the filesystem; only
//! [`document::write_document`] does, and only after the full document
//! string has been assembled.

pub mod charts;
pub mod choropleth;
pub mod document;
pub mod map;

use thiserror::Error;

/// Errors that can occur while writing rendered output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Filesystem error while writing an output document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Escapes text for embedding into HTML popup/tooltip content.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
