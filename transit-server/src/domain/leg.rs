//! Ride leg type.
//!
//! A `Leg` represents a single uninterrupted ride on one trip from boarding
//! to alighting. It uses `Arc<Trip>` for cheap cloning during search.

use std::sync::Arc;

use super::{DomainError, LocationId, ScheduleTime, StopIndex, StopTime, Trip, TripId};

/// A single-vehicle ride segment between two stops of one trip.
///
/// Times are resolved at construction so `departure_time()` and
/// `arrival_time()` never fail.
///
/// # Invariants
///
/// - `alight_idx > board_idx` (must travel forward on the trip)
/// - Both indices are valid for the trip's stop sequence
#[derive(Debug, Clone)]
pub struct Leg {
    trip: Arc<Trip>,
    board_idx: StopIndex,
    alight_idx: StopIndex,
    // Resolved at construction: departure at board stop, arrival at alight stop
    departure: ScheduleTime,
    arrival: ScheduleTime,
}

impl Leg {
    /// Construct a leg, validating indices.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `alight_idx <= board_idx` or either index is out of
    /// bounds for the trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_server::domain::{Leg, LocationId, ScheduleTime, StopIndex, StopTime, Trip, TripId};
    /// use std::sync::Arc;
    ///
    /// let time = |s: &str| ScheduleTime::parse_hhmm(s).unwrap();
    /// let trip = Arc::new(Trip {
    ///     id: TripId(1),
    ///     number: "101".into(),
    ///     name: "Chennai - Trichy".into(),
    ///     category: "Express".into(),
    ///     stops: vec![
    ///         StopTime::new(LocationId(1), time("09:00"), time("09:00")),
    ///         StopTime::new(LocationId(2), time("13:30"), time("13:30")),
    ///     ],
    /// });
    ///
    /// let leg = Leg::new(trip, StopIndex(0), StopIndex(1)).unwrap();
    /// assert_eq!(leg.departure_time().to_string(), "09:00");
    /// assert_eq!(leg.arrival_time().to_string(), "13:30");
    /// ```
    pub fn new(
        trip: Arc<Trip>,
        board_idx: StopIndex,
        alight_idx: StopIndex,
    ) -> Result<Self, DomainError> {
        if alight_idx.0 <= board_idx.0 {
            return Err(DomainError::InvalidLeg(
                "alight index must be after board index",
            ));
        }

        let board_stop = trip
            .stops
            .get(board_idx.0)
            .ok_or(DomainError::InvalidStopIndex)?;
        let alight_stop = trip
            .stops
            .get(alight_idx.0)
            .ok_or(DomainError::InvalidStopIndex)?;

        let departure = board_stop.departure;
        let arrival = alight_stop.arrival;

        Ok(Leg {
            trip,
            board_idx,
            alight_idx,
            departure,
            arrival,
        })
    }

    /// Returns the trip this leg rides.
    pub fn trip(&self) -> &Arc<Trip> {
        &self.trip
    }

    /// Returns the trip id.
    pub fn trip_id(&self) -> TripId {
        self.trip.id
    }

    /// Returns the boarding stop index.
    pub fn board_idx(&self) -> StopIndex {
        self.board_idx
    }

    /// Returns the alighting stop index.
    pub fn alight_idx(&self) -> StopIndex {
        self.alight_idx
    }

    /// Returns the boarding stop.
    pub fn board_stop(&self) -> &StopTime {
        // Safe: validated at construction
        &self.trip.stops[self.board_idx.0]
    }

    /// Returns the alighting stop.
    pub fn alight_stop(&self) -> &StopTime {
        // Safe: validated at construction
        &self.trip.stops[self.alight_idx.0]
    }

    /// Returns the boarding location.
    pub fn board_location(&self) -> LocationId {
        self.board_stop().location
    }

    /// Returns the alighting location.
    pub fn alight_location(&self) -> LocationId {
        self.alight_stop().location
    }

    /// Returns the departure time at the boarding stop.
    pub fn departure_time(&self) -> ScheduleTime {
        self.departure
    }

    /// Returns the arrival time at the alighting stop.
    pub fn arrival_time(&self) -> ScheduleTime {
        self.arrival
    }

    /// Returns the ride duration.
    pub fn duration(&self) -> chrono::Duration {
        self.arrival.signed_duration_since(self.departure)
    }

    /// Returns the number of intermediate stops (excluding board and alight).
    pub fn intermediate_stop_count(&self) -> usize {
        self.alight_idx.0 - self.board_idx.0 - 1
    }

    /// Returns all stops of this leg (board to alight, inclusive).
    pub fn stops(&self) -> &[StopTime] {
        &self.trip.stops[self.board_idx.0..=self.alight_idx.0]
    }
}

impl PartialEq for Leg {
    fn eq(&self, other: &Self) -> bool {
        self.trip.id == other.trip.id
            && self.board_idx == other.board_idx
            && self.alight_idx == other.alight_idx
    }
}

impl Eq for Leg {}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Build a trip with `n` stops, 15 minutes apart, 2-minute dwell.
    fn trip_with_stops(n: usize, start_mins: i32) -> Arc<Trip> {
        let stops = (0..n)
            .map(|i| {
                let arrival = ScheduleTime::from_minutes(start_mins + (i as i32) * 15);
                let dwell = if i == 0 || i == n - 1 { 0 } else { 2 };
                StopTime::new(
                    LocationId(i as u32),
                    arrival,
                    arrival + chrono::Duration::minutes(dwell),
                )
            })
            .collect();

        Arc::new(Trip {
            id: TripId(99),
            number: "X".into(),
            name: "Generated".into(),
            category: "Ordinary".into(),
            stops,
        })
    }

    proptest! {
        /// Leg::new with board >= alight always fails.
        #[test]
        fn invalid_indices_fail(
            num_stops in 2usize..10,
            board in 0usize..10,
            alight in 0usize..10,
            start_mins in 0i32..1200,
        ) {
            let trip = trip_with_stops(num_stops, start_mins);

            if board >= alight {
                prop_assert!(Leg::new(trip, StopIndex(board), StopIndex(alight)).is_err());
            }
        }

        /// Every valid (board, alight) pair constructs, and the leg never
        /// travels backwards in time.
        #[test]
        fn valid_indices_succeed(
            num_stops in 2usize..10,
            start_mins in 0i32..1200,
        ) {
            let trip = trip_with_stops(num_stops, start_mins);

            for board in 0..num_stops {
                for alight in (board + 1)..num_stops {
                    let leg = Leg::new(trip.clone(), StopIndex(board), StopIndex(alight));
                    prop_assert!(leg.is_ok());
                    let leg = leg.unwrap();
                    prop_assert!(leg.arrival_time() >= leg.departure_time());
                    prop_assert_eq!(leg.stops().len(), alight - board + 1);
                }
            }
        }
    }
}
