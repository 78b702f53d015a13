//! Route result types.
//!
//! A `Route` is one way of travelling from an origin to a destination:
//! a single leg (direct) or several legs joined at connection points.

use chrono::Duration;

use super::{DomainError, Leg, LocationId, ScheduleTime, TripId};

/// How a route gets the traveller there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// One vehicle end to end.
    Direct,
    /// At least one transfer between vehicles.
    Connecting,
}

/// Dedup key for a route: the ordered trips ridden and the locations where
/// the traveller changes vehicle. Two routes with the same signature are the
/// same itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteSignature {
    trip_ids: Vec<TripId>,
    connection_points: Vec<LocationId>,
}

/// A complete route from origin to destination.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs share a connection location
/// - No trip id appears in two legs
#[derive(Debug, Clone)]
pub struct Route {
    legs: Vec<Leg>,
    /// Name of the location the vehicle continues to past the requested
    /// destination, for direct routes that are not the trip's last stop.
    continues_beyond: Option<String>,
}

impl Route {
    /// Construct a route from legs.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the leg list is empty, consecutive legs don't share
    /// a location, or a trip id is used twice.
    pub fn new(legs: Vec<Leg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        for pair in legs.windows(2) {
            let alight = pair[0].alight_location();
            let board = pair[1].board_location();
            if alight != board {
                return Err(DomainError::LegsNotConnected(alight, board));
            }
        }

        for (i, leg) in legs.iter().enumerate() {
            if legs[..i].iter().any(|prev| prev.trip_id() == leg.trip_id()) {
                return Err(DomainError::TripReused(leg.trip_id()));
            }
        }

        Ok(Route {
            legs,
            continues_beyond: None,
        })
    }

    /// Attach the name of the location a direct trip continues to.
    pub fn set_continues_beyond(&mut self, location_name: impl Into<String>) {
        self.continues_beyond = Some(location_name.into());
    }

    /// Returns the continuation annotation, if any.
    pub fn continues_beyond(&self) -> Option<&str> {
        self.continues_beyond.as_deref()
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Direct or Connecting.
    pub fn kind(&self) -> RouteKind {
        if self.legs.len() == 1 {
            RouteKind::Direct
        } else {
            RouteKind::Connecting
        }
    }

    /// Returns true for a single-leg route.
    pub fn is_direct(&self) -> bool {
        self.legs.len() == 1
    }

    /// Number of vehicle changes. Always `legs().len() - 1`.
    pub fn transfers(&self) -> usize {
        self.legs.len() - 1
    }

    /// Locations where the traveller changes vehicle, in travel order.
    pub fn connection_points(&self) -> Vec<LocationId> {
        self.legs
            .windows(2)
            .map(|pair| pair[0].alight_location())
            .collect()
    }

    /// Wait at each connection point, in travel order.
    pub fn waits(&self) -> Vec<Duration> {
        self.legs
            .windows(2)
            .map(|pair| {
                pair[1]
                    .departure_time()
                    .signed_duration_since(pair[0].arrival_time())
            })
            .collect()
    }

    /// Departure time from the origin.
    pub fn departure_time(&self) -> ScheduleTime {
        // Safe: validated non-empty at construction
        self.legs.first().unwrap().departure_time()
    }

    /// Arrival time at the destination.
    pub fn arrival_time(&self) -> ScheduleTime {
        // Safe: validated non-empty at construction
        self.legs.last().unwrap().arrival_time()
    }

    /// Total duration from first departure to last arrival.
    pub fn total_duration(&self) -> Duration {
        self.arrival_time()
            .signed_duration_since(self.departure_time())
    }

    /// Dedup signature: ordered trip ids plus connection locations.
    pub fn signature(&self) -> RouteSignature {
        RouteSignature {
            trip_ids: self.legs.iter().map(Leg::trip_id).collect(),
            connection_points: self.connection_points(),
        }
    }
}
