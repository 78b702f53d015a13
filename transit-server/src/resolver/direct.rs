//! Same-trip matching.
//!
//! Finds routes where a single vehicle carries the traveller from origin to
//! destination, driven by the origin's occurrence list.

use std::collections::HashSet;

use crate::domain::{Leg, LocationId, Route, TripId};
use crate::schedule::ScheduleSnapshot;

/// Find all direct (single-leg) routes from origin to destination.
///
/// For each trip, the earliest boarding index at the origin that still
/// reaches the destination wins. A trip that visits the origin twice (loop
/// route) is matched from its first occurrence with a valid ordered pair.
pub fn find_direct_routes(
    snapshot: &ScheduleSnapshot,
    origin: LocationId,
    destination: LocationId,
) -> Vec<Route> {
    let mut matched: HashSet<TripId> = HashSet::new();
    let mut routes = Vec::new();

    for occurrence in snapshot.occurrences_at(origin) {
        // Occurrences are departure-sorted, and stop times are monotonic, so
        // the first valid pair seen for a trip is its earliest boarding.
        if matched.contains(&occurrence.trip.id) {
            continue;
        }

        let Some((alight_idx, _)) = occurrence
            .trip
            .find_stop(destination, occurrence.stop_idx.next())
        else {
            continue;
        };

        let Ok(leg) = Leg::new(occurrence.trip.clone(), occurrence.stop_idx, alight_idx) else {
            continue;
        };

        if let Ok(route) = Route::new(vec![leg]) {
            matched.insert(occurrence.trip.id);
            routes.push(route);
        }
    }

    routes
}
