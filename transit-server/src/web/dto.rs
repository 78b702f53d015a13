//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Leg, LocationId, Route, RouteKind};
use crate::resolver::{SearchOverrides, SearchRequest};

/// Query parameters for a route search.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRouteParams {
    /// Where the traveller starts
    pub origin_location_id: u32,

    /// Where the traveller wants to go
    pub destination_location_id: u32,

    /// Maximum vehicle transfers (server default when omitted)
    pub max_transfers: Option<usize>,

    /// Minimum connection time in minutes
    pub min_transfer_buffer_minutes: Option<i64>,

    /// Maximum acceptable wait at a connection point in minutes
    pub max_transfer_wait_minutes: Option<i64>,

    /// Maximum number of routes to return
    pub max_results: Option<usize>,
}

impl SearchRouteParams {
    /// Convert to a resolver request.
    pub fn into_request(self) -> SearchRequest {
        SearchRequest {
            origin: LocationId(self.origin_location_id),
            destination: LocationId(self.destination_location_id),
            overrides: SearchOverrides {
                max_transfers: self.max_transfers,
                max_results: self.max_results,
                min_transfer_buffer_mins: self.min_transfer_buffer_minutes,
                max_transfer_wait_mins: self.max_transfer_wait_minutes,
            },
            deadline: None,
        }
    }
}

/// One leg of a connecting route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegResult {
    pub trip_id: u32,
    pub trip_number: String,
    pub from_stop_index: usize,
    pub to_stop_index: usize,
    pub departure_time: String,
    pub arrival_time: String,
}

impl LegResult {
    fn from_leg(leg: &Leg) -> Self {
        Self {
            trip_id: leg.trip_id().0,
            trip_number: leg.trip().number.clone(),
            from_stop_index: leg.board_idx().0,
            to_stop_index: leg.alight_idx().0,
            departure_time: leg.departure_time().to_string(),
            arrival_time: leg.arrival_time().to_string(),
        }
    }
}

/// A ranked route in search results.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RouteResult {
    #[serde(rename_all = "camelCase")]
    Direct {
        trip_id: u32,
        trip_number: String,
        trip_name: String,
        departure_time: String,
        arrival_time: String,
        total_duration_minutes: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        continues_beyond: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Connecting {
        legs: Vec<LegResult>,
        connection_points: Vec<u32>,
        wait_minutes: Vec<i64>,
        transfers: usize,
        total_duration_minutes: i64,
    },
}

impl RouteResult {
    /// Convert a domain route for the wire.
    pub fn from_route(route: &Route) -> Self {
        match route.kind() {
            RouteKind::Direct => {
                let leg = &route.legs()[0];
                RouteResult::Direct {
                    trip_id: leg.trip_id().0,
                    trip_number: leg.trip().number.clone(),
                    trip_name: leg.trip().name.clone(),
                    departure_time: leg.departure_time().to_string(),
                    arrival_time: leg.arrival_time().to_string(),
                    total_duration_minutes: route.total_duration().num_minutes(),
                    continues_beyond: route.continues_beyond().map(str::to_owned),
                }
            }
            RouteKind::Connecting => RouteResult::Connecting {
                legs: route.legs().iter().map(LegResult::from_leg).collect(),
                connection_points: route.connection_points().iter().map(|l| l.0).collect(),
                wait_minutes: route.waits().iter().map(|w| w.num_minutes()).collect(),
                transfers: route.transfers(),
                total_duration_minutes: route.total_duration().num_minutes(),
            },
        }
    }
}

/// Response for a route search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRouteResponse {
    /// Routes ranked best-first
    pub routes: Vec<RouteResult>,

    /// True when the search budget or deadline cut exploration short
    pub truncated: bool,
}

/// Response after replacing the schedule.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLoadResponse {
    /// Generation of the newly installed snapshot
    pub generation: u64,

    /// Reference locations in the snapshot
    pub locations: usize,

    /// Trips indexed
    pub trips_indexed: usize,

    /// Trips dropped by integrity checks or time parsing
    pub trips_rejected: usize,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
