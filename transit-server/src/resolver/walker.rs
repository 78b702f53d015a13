//! Bounded multi-leg search across the occurrence index.
//!
//! Explores connecting routes with an explicit frontier (a queue of partial
//! paths) rather than recursion, so stack depth stays constant and the
//! exploration budget is enforceable. All bookkeeping is request-scoped;
//! nothing is shared between concurrent searches.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use crate::domain::{Leg, LocationId, Route, StopIndex, Trip, TripId};
use crate::schedule::ScheduleSnapshot;

use super::config::SearchConfig;

/// Routes found by the walker plus exploration accounting.
#[derive(Debug)]
pub struct WalkResult {
    /// Complete routes reaching the destination (including zero-transfer
    /// ones, deduplicated against the direct matcher downstream).
    pub routes: Vec<Route>,
    /// Frontier nodes expanded.
    pub explored: usize,
    /// True when the node budget or deadline cut the search short.
    pub truncated: bool,
}

/// A partial path: aboard `trip` since `board_idx`, with the legs ridden
/// before boarding it.
#[derive(Debug, Clone)]
struct PathState {
    trip: Arc<Trip>,
    board_idx: StopIndex,
    /// Legs completed before boarding the current trip.
    legs: Vec<Leg>,
    /// Trip ids used anywhere in the path, including the current trip.
    used_trips: HashSet<TripId>,
    /// Origin plus every connection point used so far.
    visited: HashSet<LocationId>,
}

/// Search for routes from `origin` to `destination` with bounded transfers.
pub fn walk(
    snapshot: &ScheduleSnapshot,
    origin: LocationId,
    destination: LocationId,
    config: &SearchConfig,
    deadline: Option<Instant>,
) -> WalkResult {
    let mut routes = Vec::new();
    let mut explored = 0;
    let mut truncated = false;

    // Seed: each occurrence at the origin is a zero-leg partial path.
    let mut frontier: VecDeque<PathState> = snapshot
        .occurrences_at(origin)
        .iter()
        .map(|occurrence| PathState {
            trip: occurrence.trip.clone(),
            board_idx: occurrence.stop_idx,
            legs: Vec::new(),
            used_trips: HashSet::from([occurrence.trip.id]),
            visited: HashSet::from([origin]),
        })
        .collect();

    while let Some(state) = frontier.pop_front() {
        if explored >= config.max_explored_nodes {
            truncated = true;
            break;
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            truncated = true;
            break;
        }
        explored += 1;

        // Terminal check: the current trip reaches the destination after the
        // boarding index. Record and stop extending this path.
        if let Some((alight_idx, _)) = state
            .trip
            .find_stop(destination, state.board_idx.next())
        {
            let Ok(final_leg) = Leg::new(state.trip.clone(), state.board_idx, alight_idx) else {
                continue;
            };
            let mut legs = state.legs;
            legs.push(final_leg);
            if let Ok(route) = Route::new(legs) {
                routes.push(route);
            }
            continue;
        }

        // Transferring boards one more trip, for at least
        // `state.legs.len() + 2` legs overall.
        if state.legs.len() + 1 > config.max_transfers {
            continue;
        }

        // Alight at any later stop and board another trip there.
        for alight_idx in (state.board_idx.0 + 1)..state.trip.stops.len() {
            let stop = &state.trip.stops[alight_idx];

            if state.visited.contains(&stop.location) {
                continue;
            }

            let Ok(leg) = Leg::new(state.trip.clone(), state.board_idx, StopIndex(alight_idx))
            else {
                continue;
            };

            let earliest = stop.arrival + config.min_transfer_buffer();
            let latest = stop.arrival + config.max_transfer_wait();

            for candidate in snapshot.departures_in_window(stop.location, earliest, latest) {
                if state.used_trips.contains(&candidate.trip.id) {
                    continue;
                }

                let mut legs = state.legs.clone();
                legs.push(leg.clone());

                let mut used_trips = state.used_trips.clone();
                used_trips.insert(candidate.trip.id);

                let mut visited = state.visited.clone();
                visited.insert(stop.location);

                frontier.push_back(PathState {
                    trip: candidate.trip.clone(),
                    board_idx: candidate.stop_idx,
                    legs,
                    used_trips,
                    visited,
                });
            }
        }
    }

    WalkResult {
        routes,
        explored,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, ScheduleTime, StopTime};
    use chrono::Duration;

    fn time(s: &str) -> ScheduleTime {
        ScheduleTime::parse_hhmm(s).unwrap()
    }

    fn locations(ids: &[u32]) -> Vec<Location> {
        ids.iter()
            .map(|id| Location::new(LocationId(*id), format!("Location {id}")))
            .collect()
    }

    fn trip(id: u32, stops: &[(u32, &str, &str)]) -> Trip {
        Trip {
            id: TripId(id),
            number: format!("{id}"),
            name: format!("Trip {id}"),
            category: "Express".into(),
            stops: stops
                .iter()
                .map(|(loc, arr, dep)| StopTime::new(LocationId(*loc), time(arr), time(dep)))
                .collect(),
        }
    }

    fn config(max_transfers: usize, min_buffer: i64, max_wait: i64) -> SearchConfig {
        SearchConfig {
            max_transfers,
            min_transfer_buffer_mins: min_buffer,
            max_transfer_wait_mins: max_wait,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn one_transfer_route() {
        // Trip 1: Chennai(1) -> Salem(2), Trip 2: Salem(2) -> Coimbatore(3)
        let snapshot = ScheduleSnapshot::build(
            locations(&[1, 2, 3]),
            vec![
                trip(1, &[(1, "06:30", "06:30"), (2, "10:30", "10:30")]),
                trip(2, &[(2, "11:00", "11:00"), (3, "13:30", "13:30")]),
            ],
        );

        let result = walk(
            &snapshot,
            LocationId(1),
            LocationId(3),
            &config(1, 15, 240),
            None,
        );

        assert!(!result.truncated);
        assert_eq!(result.routes.len(), 1);

        let route = &result.routes[0];
        assert_eq!(route.transfers(), 1);
        assert_eq!(route.connection_points(), vec![LocationId(2)]);
        assert_eq!(route.waits(), vec![Duration::minutes(30)]);
        assert_eq!(route.total_duration(), Duration::minutes(420));
    }

    #[test]
    fn transfer_outside_wait_window_is_infeasible() {
        let snapshot = ScheduleSnapshot::build(
            locations(&[1, 2, 3]),
            vec![
                trip(1, &[(1, "06:30", "06:30"), (2, "10:30", "10:30")]),
                trip(2, &[(2, "11:00", "11:00"), (3, "13:30", "13:30")]),
            ],
        );

        // Wait is 30 minutes but only 20 are acceptable
        let result = walk(
            &snapshot,
            LocationId(1),
            LocationId(3),
            &config(1, 15, 20),
            None,
        );

        assert!(result.routes.is_empty());
        assert!(!result.truncated);
    }

    #[test]
    fn transfer_tighter_than_buffer_is_infeasible() {
        let snapshot = ScheduleSnapshot::build(
            locations(&[1, 2, 3]),
            vec![
                trip(1, &[(1, "06:30", "06:30"), (2, "10:30", "10:30")]),
                trip(2, &[(2, "10:40", "10:40"), (3, "13:00", "13:00")]),
            ],
        );

        // 10-minute connection, 15-minute minimum buffer
        let result = walk(
            &snapshot,
            LocationId(1),
            LocationId(3),
            &config(1, 15, 240),
            None,
        );

        assert!(result.routes.is_empty());
    }

    #[test]
    fn zero_transfer_route_recorded_as_direct() {
        let snapshot = ScheduleSnapshot::build(
            locations(&[1, 2]),
            vec![trip(1, &[(1, "09:00", "09:00"), (2, "13:30", "13:30")])],
        );

        let result = walk(
            &snapshot,
            LocationId(1),
            LocationId(2),
            &config(1, 5, 240),
            None,
        );

        assert_eq!(result.routes.len(), 1);
        assert!(result.routes[0].is_direct());
    }

    #[test]
    fn never_reuses_a_trip() {
        // Only one trip serves the corridor; alighting at 2 and "changing"
        // back onto the same trip must not be offered.
        let snapshot = ScheduleSnapshot::build(
            locations(&[1, 2, 3]),
            vec![
                trip(1, &[(1, "09:00", "09:00"), (2, "10:00", "10:05"), (3, "11:00", "11:00")]),
            ],
        );

        let result = walk(
            &snapshot,
            LocationId(1),
            LocationId(3),
            &config(3, 5, 240),
            None,
        );

        // Only the single-vehicle ride is possible
        assert_eq!(result.routes.len(), 1);
        assert_eq!(result.routes[0].transfers(), 0);
        for route in &result.routes {
            let mut seen = HashSet::new();
            for leg in route.legs() {
                assert!(seen.insert(leg.trip_id()));
            }
        }
    }

    #[test]
    fn respects_max_transfers() {
        // Chain 1 -> 2 -> 3 -> 4 needing two transfers
        let trips = vec![
            trip(1, &[(1, "06:00", "06:00"), (2, "07:00", "07:00")]),
            trip(2, &[(2, "07:30", "07:30"), (3, "08:30", "08:30")]),
            trip(3, &[(3, "09:00", "09:00"), (4, "10:00", "10:00")]),
        ];

        let snapshot = ScheduleSnapshot::build(locations(&[1, 2, 3, 4]), trips.clone());
        let result = walk(
            &snapshot,
            LocationId(1),
            LocationId(4),
            &config(1, 5, 240),
            None,
        );
        assert!(result.routes.is_empty());

        let snapshot = ScheduleSnapshot::build(locations(&[1, 2, 3, 4]), trips);
        let result = walk(
            &snapshot,
            LocationId(1),
            LocationId(4),
            &config(2, 5, 240),
            None,
        );
        assert_eq!(result.routes.len(), 1);
        assert_eq!(result.routes[0].transfers(), 2);
    }

    #[test]
    fn never_revisits_a_connection_point() {
        // Reaching 4 needs 1 -> 2 -> 3 -> 2 -> 4, revisiting 2 as a
        // connection point; trip 4 departs too late to board on the first
        // pass through 2 (outside the wait window).
        let snapshot = ScheduleSnapshot::build(
            locations(&[1, 2, 3, 4]),
            vec![
                trip(1, &[(1, "06:00", "06:00"), (2, "07:00", "07:00")]),
                trip(2, &[(2, "07:30", "07:30"), (3, "08:30", "08:30")]),
                trip(3, &[(3, "09:00", "09:00"), (2, "10:00", "10:00")]),
                trip(4, &[(2, "11:30", "11:30"), (4, "12:30", "12:30")]),
            ],
        );

        let result = walk(
            &snapshot,
            LocationId(1),
            LocationId(4),
            &config(5, 5, 240),
            None,
        );

        assert!(result.routes.is_empty());
    }

    #[test]
    fn node_budget_truncates() {
        let snapshot = ScheduleSnapshot::build(
            locations(&[1, 2, 3]),
            vec![
                trip(1, &[(1, "06:30", "06:30"), (2, "10:30", "10:30")]),
                trip(2, &[(2, "11:00", "11:00"), (3, "13:30", "13:30")]),
            ],
        );

        let config = SearchConfig {
            max_explored_nodes: 1,
            min_transfer_buffer_mins: 15,
            ..SearchConfig::default()
        };

        let result = walk(&snapshot, LocationId(1), LocationId(3), &config, None);

        assert!(result.truncated);
        assert!(result.explored <= 1);
    }

    #[test]
    fn expired_deadline_truncates() {
        let snapshot = ScheduleSnapshot::build(
            locations(&[1, 2]),
            vec![trip(1, &[(1, "09:00", "09:00"), (2, "13:30", "13:30")])],
        );

        let past = Instant::now() - std::time::Duration::from_secs(1);
        let result = walk(
            &snapshot,
            LocationId(1),
            LocationId(2),
            &config(1, 5, 240),
            Some(past),
        );

        assert!(result.truncated);
        assert!(result.routes.is_empty());
    }

    #[test]
    fn picks_all_feasible_departures_in_window() {
        // Two onward trips from the connection point, both within the window
        let snapshot = ScheduleSnapshot::build(
            locations(&[1, 2, 3]),
            vec![
                trip(1, &[(1, "06:30", "06:30"), (2, "10:30", "10:30")]),
                trip(2, &[(2, "11:00", "11:00"), (3, "13:30", "13:30")]),
                trip(3, &[(2, "12:00", "12:00"), (3, "14:30", "14:30")]),
            ],
        );

        let result = walk(
            &snapshot,
            LocationId(1),
            LocationId(3),
            &config(1, 15, 240),
            None,
        );

        assert_eq!(result.routes.len(), 2);
    }
}
