//! Upstream schedule feed parsing.
//!
//! The schedule-data collaborator hands over a JSON document of locations
//! and trips with "HH:MM" stop times. This module parses that document and
//! converts it into validated domain types. A malformed individual trip is
//! skipped with a warning; only a malformed document is an error.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::domain::{
    Coordinates, Location, LocationId, ScheduleTime, StopTime, Trip, TripId,
};

/// Error reading or parsing a schedule feed document.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Failed to read the schedule file
    #[error("failed to read schedule file: {0}")]
    Io(#[from] std::io::Error),

    /// Document is not valid JSON for the expected shape
    #[error("malformed schedule document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A location entry in the feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// A stop-time entry in the feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopEntry {
    pub location_id: u32,
    pub sequence_index: u32,
    /// "HH:MM", hours up to 47 for overnight trips
    pub arrival_time: String,
    /// "HH:MM", hours up to 47 for overnight trips
    pub departure_time: String,
}

/// A trip entry in the feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripEntry {
    pub id: u32,
    pub number: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub stops: Vec<StopEntry>,
}

/// The full schedule feed document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFeed {
    pub locations: Vec<LocationEntry>,
    pub trips: Vec<TripEntry>,
}

/// Feed converted to domain types, ready for the snapshot builder.
#[derive(Debug)]
pub struct DomainSchedule {
    pub locations: Vec<Location>,
    pub trips: Vec<Trip>,
    /// Trips dropped during conversion (unparseable times).
    pub malformed_trips: usize,
}

impl ScheduleFeed {
    /// Read and parse a feed document from a JSON file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Parse a feed document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert the feed into domain types.
    ///
    /// Trips whose times fail to parse are dropped with a warning; deeper
    /// integrity checks (monotonicity, unknown locations) belong to the
    /// snapshot builder.
    pub fn into_domain(self) -> DomainSchedule {
        let locations = self
            .locations
            .into_iter()
            .map(|entry| Location {
                id: LocationId(entry.id),
                name: entry.name,
                coordinates: match (entry.latitude, entry.longitude) {
                    (Some(latitude), Some(longitude)) => Some(Coordinates {
                        latitude,
                        longitude,
                    }),
                    _ => None,
                },
            })
            .collect();

        let mut trips = Vec::new();
        let mut malformed_trips = 0;

        for entry in self.trips {
            match convert_trip(entry) {
                Ok(trip) => trips.push(trip),
                Err((id, value)) => {
                    warn!(trip = id, time = %value, "dropping trip with unparseable stop time");
                    malformed_trips += 1;
                }
            }
        }

        DomainSchedule {
            locations,
            trips,
            malformed_trips,
        }
    }
}

/// Convert one trip entry; `Err` carries the trip id and offending time
/// string for the caller's warning.
fn convert_trip(entry: TripEntry) -> Result<Trip, (u32, String)> {
    let mut stops = entry.stops;
    stops.sort_by_key(|s| s.sequence_index);

    let stops = stops
        .into_iter()
        .map(|stop| {
            let arrival = ScheduleTime::parse_hhmm(&stop.arrival_time)
                .map_err(|_| (entry.id, stop.arrival_time.clone()))?;
            let departure = ScheduleTime::parse_hhmm(&stop.departure_time)
                .map_err(|_| (entry.id, stop.departure_time.clone()))?;
            Ok(StopTime::new(LocationId(stop.location_id), arrival, departure))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Trip {
        id: TripId(entry.id),
        number: entry.number,
        name: entry.name,
        category: entry.category,
        stops,
    })
}
