//! Incident load and insert queries.
//!
//! The load query excludes rows lacking coordinates at the SQL level, so
//! every returned [`Incident`] is usable for spatial aggregation without
//! further filtering.

use chrono::NaiveDateTime;
use duckdb::Connection;
use hotspot_map_incident_models::Incident;

use crate::DbError;

/// A raw incident row for insertion into the store.
///
/// Coordinates are optional here: the store keeps rows without a location,
/// the load query filters them out.
#[derive(Debug, Clone)]
pub struct IncidentRow {
    /// Source case identifier.
    pub case_number: String,
    /// Timestamp of occurrence.
    pub occurred_at: NaiveDateTime,
    /// Year of occurrence.
    pub year: i32,
    /// Free-text incident description.
    pub description: Option<String>,
    /// Free-text location type.
    pub location_description: Option<String>,
    /// Latitude, if the record was geolocated.
    pub latitude: Option<f64>,
    /// Longitude, if the record was geolocated.
    pub longitude: Option<f64>,
}

/// Loads all incidents that have coordinates, with derived temporal
/// features attached.
///
/// # Errors
///
/// Returns [`DbError`] if the query fails or a stored timestamp cannot
/// be parsed.
pub fn load_incidents(conn: &Connection) -> Result<Vec<Incident>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT case_number, occurred_at::TEXT, year, description,
                location_description, latitude, longitude
         FROM homicides
         WHERE latitude IS NOT NULL AND longitude IS NOT NULL
         ORDER BY occurred_at",
    )?;
    let mut rows = stmt.query([])?;

    let mut incidents = Vec::new();
    while let Some(row) = rows.next()? {
        let case_number: String = row.get(0)?;
        let occurred_at_raw: String = row.get(1)?;
        let year: i32 = row.get(2)?;
        let description: Option<String> = row.get(3)?;
        let location_description: Option<String> = row.get(4)?;
        let latitude: f64 = row.get(5)?;
        let longitude: f64 = row.get(6)?;

        let occurred_at =
            parse_timestamp(&occurred_at_raw).ok_or_else(|| DbError::Conversion {
                message: format!(
                    "Unparseable occurred_at {occurred_at_raw:?} for case {case_number}"
                ),
            })?;

        incidents.push(Incident::new(
            case_number,
            occurred_at,
            year,
            description,
            location_description,
            latitude,
            longitude,
        ));
    }

    log::info!("Loaded {} incidents with coordinates", incidents.len());

    Ok(incidents)
}

/// Inserts a batch of incident rows into the store.
///
/// Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`DbError`] if any insert fails.
pub fn insert_incidents(conn: &Connection, rows: &[IncidentRow]) -> Result<u64, DbError> {
    let mut stmt = conn.prepare(
        "INSERT INTO homicides (case_number, occurred_at, year, description,
                                location_description, latitude, longitude)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )?;

    let mut inserted = 0u64;
    for row in rows {
        stmt.execute(duckdb::params![
            row.case_number,
            row.occurred_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            row.year,
            row.description,
            row.location_description,
            row.latitude,
            row.longitude,
        ])?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Parses a `DuckDB` timestamp text representation.
///
/// The `::TEXT` cast can produce `2024-01-15 10:30:00` or, for stores
/// populated with fractional seconds, `2024-01-15 10:30:00.123`. ISO 8601
/// `T`-separated forms are accepted for stores imported from raw portal
/// exports.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(s, format) {
            return Some(parsed);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike as _, NaiveDate, Timelike as _};
    use hotspot_map_incident_models::Season;

    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn row(case: &str, occurred_at: NaiveDateTime, coords: Option<(f64, f64)>) -> IncidentRow {
        IncidentRow {
            case_number: case.to_string(),
            occurred_at,
            year: occurred_at.year(),
            description: Some("FIRST DEGREE MURDER".to_string()),
            location_description: Some("STREET".to_string()),
            latitude: coords.map(|(lat, _)| lat),
            longitude: coords.map(|(_, lng)| lng),
        }
    }

    #[test]
    fn excludes_rows_without_coordinates() {
        let conn = crate::open_in_memory().unwrap();

        insert_incidents(
            &conn,
            &[
                row("JH100001", dt(2024, 1, 15, 14), Some((41.88, -87.63))),
                row("JH100002", dt(2024, 2, 1, 3), None),
                row("JH100003", dt(2024, 3, 20, 22), Some((41.75, -87.55))),
            ],
        )
        .unwrap();

        let incidents = load_incidents(&conn).unwrap();

        assert_eq!(incidents.len(), 2);
        assert!(incidents.iter().all(|i| i.case_number != "JH100002"));
    }

    #[test]
    fn attaches_derived_features_on_load() {
        let conn = crate::open_in_memory().unwrap();

        // 2024-07-06 is a Saturday
        insert_incidents(
            &conn,
            &[row("JH200001", dt(2024, 7, 6, 23), Some((41.88, -87.63)))],
        )
        .unwrap();

        let incidents = load_incidents(&conn).unwrap();

        assert_eq!(incidents.len(), 1);
        let incident = &incidents[0];
        assert_eq!(incident.day_name(), "Saturday");
        assert_eq!(incident.hour, 23);
        assert_eq!(incident.season, Season::Summer);
        assert_eq!(incident.occurred_at.hour(), 23);
    }

    #[test]
    fn empty_store_loads_empty_collection() {
        let conn = crate::open_in_memory().unwrap();
        let incidents = load_incidents(&conn).unwrap();
        assert!(incidents.is_empty());
    }

    #[test]
    fn parses_duckdb_timestamp_variants() {
        assert!(parse_timestamp("2024-01-15 10:30:00").is_some());
        assert!(parse_timestamp("2024-01-15 10:30:00.123").is_some());
        assert!(parse_timestamp("2024-01-15T10:30:00").is_some());
        assert!(parse_timestamp("not-a-timestamp").is_none());
    }
}
