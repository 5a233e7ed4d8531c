#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `DuckDB` incident store.
//!
//! Opens the homicide incident database, ensures the schema exists, and
//! provides the load query used by both pipelines. The connection is
//! scoped to the load step; dropping it releases the store on every path,
//! success or failure.

pub mod queries;

use std::path::Path;

use duckdb::Connection;

/// Errors that can occur during incident store operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    /// Filesystem error while preparing the database path.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Opens (or creates) the incident `DuckDB` and ensures schema exists.
///
/// # Errors
///
/// Returns [`DbError`] if the connection or schema creation fails.
pub fn open(path: &Path) -> Result<Connection, DbError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;

    conn.execute_batch("SET threads = 4; SET memory_limit = '512MB';")?;

    create_schema(&conn)?;

    Ok(conn)
}

/// Opens an in-memory incident store with the schema applied.
///
/// Used by tests and ad-hoc tooling that build a store from scratch.
///
/// # Errors
///
/// Returns [`DbError`] if the connection or schema creation fails.
pub fn open_in_memory() -> Result<Connection, DbError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

fn create_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS homicides (
            case_number TEXT NOT NULL PRIMARY KEY,
            occurred_at TIMESTAMP NOT NULL,
            year INTEGER NOT NULL,
            description TEXT,
            location_description TEXT,
            latitude DOUBLE,
            longitude DOUBLE
        );",
    )?;

    Ok(())
}
