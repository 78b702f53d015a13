//! Immutable schedule snapshot with per-location occurrence indexes.
//!
//! The key observation is that every leg of every route boards at some
//! location at some departure time. Indexing each (trip, stop) pair by its
//! location, sorted by departure, turns the per-query cost of finding
//! transfer candidates from a full scan over all trips into a binary search
//! plus a bounded walk.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::domain::{Location, LocationId, ScheduleTime, StopIndex, Trip};

/// One (trip, stop) pair, the unit indexed per location.
#[derive(Debug, Clone)]
pub struct Occurrence {
    /// The trip stopping here.
    pub trip: Arc<Trip>,
    /// Position of this stop within the trip.
    pub stop_idx: StopIndex,
    /// Scheduled arrival at this stop.
    pub arrival: ScheduleTime,
    /// Scheduled departure from this stop.
    pub departure: ScheduleTime,
}

/// An immutable snapshot of the schedule: reference locations, valid trips,
/// and the derived per-location occurrence index.
///
/// Built once per schedule change and shared read-only between concurrent
/// searches. Trips that fail integrity checks are excluded with a warning,
/// never aborting the build.
#[derive(Debug)]
pub struct ScheduleSnapshot {
    locations: HashMap<LocationId, Location>,
    trips: Vec<Arc<Trip>>,
    index: HashMap<LocationId, Vec<Occurrence>>,
    rejected_trips: usize,
}

impl ScheduleSnapshot {
    /// Build a snapshot from reference locations and raw trips.
    ///
    /// A trip is excluded (with a data-integrity warning) when it has fewer
    /// than two stops, its stop times are not monotonic, or it references a
    /// location missing from the reference data.
    pub fn build(locations: Vec<Location>, trips: Vec<Trip>) -> Self {
        let locations: HashMap<LocationId, Location> =
            locations.into_iter().map(|l| (l.id, l)).collect();

        let mut index: HashMap<LocationId, Vec<Occurrence>> = HashMap::new();
        let mut valid_trips = Vec::with_capacity(trips.len());
        let mut rejected_trips = 0;

        for trip in trips {
            if trip.stops.len() < 2 {
                warn!(trip = %trip.id, "skipping trip with fewer than two stops");
                rejected_trips += 1;
                continue;
            }

            if !trip.schedule_is_monotonic() {
                warn!(trip = %trip.id, "skipping trip with non-monotonic stop times");
                rejected_trips += 1;
                continue;
            }

            if let Some(stop) = trip
                .stops
                .iter()
                .find(|s| !locations.contains_key(&s.location))
            {
                warn!(
                    trip = %trip.id,
                    location = %stop.location,
                    "skipping trip referencing unknown location"
                );
                rejected_trips += 1;
                continue;
            }

            let trip = Arc::new(trip);

            for (idx, stop) in trip.stops.iter().enumerate() {
                index.entry(stop.location).or_default().push(Occurrence {
                    trip: trip.clone(),
                    stop_idx: StopIndex(idx),
                    arrival: stop.arrival,
                    departure: stop.departure,
                });
            }

            valid_trips.push(trip);
        }

        // Sort each location's occurrences by departure; trip id and stop
        // index break ties so iteration order is deterministic.
        for occurrences in index.values_mut() {
            occurrences.sort_by_key(|o| (o.departure, o.trip.id, o.stop_idx));
        }

        Self {
            locations,
            trips: valid_trips,
            index,
            rejected_trips,
        }
    }

    /// Occurrences at a location, sorted ascending by departure time.
    pub fn occurrences_at(&self, location: LocationId) -> &[Occurrence] {
        self.index
            .get(&location)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Occurrences at a location departing within `[earliest, latest]`.
    pub fn departures_in_window(
        &self,
        location: LocationId,
        earliest: ScheduleTime,
        latest: ScheduleTime,
    ) -> &[Occurrence] {
        let all = self.occurrences_at(location);
        let from = all.partition_point(|o| o.departure < earliest);
        let to = all.partition_point(|o| o.departure <= latest);
        &all[from..to]
    }

    /// Look up reference data for a location.
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Is the location known to this snapshot?
    pub fn contains_location(&self, id: LocationId) -> bool {
        self.locations.contains_key(&id)
    }

    /// All trips that passed integrity checks.
    pub fn trips(&self) -> &[Arc<Trip>] {
        &self.trips
    }

    /// Number of indexed trips.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Number of reference locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of trips excluded by integrity checks.
    pub fn rejected_trip_count(&self) -> usize {
        self.rejected_trips
    }
}
