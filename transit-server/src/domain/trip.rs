//! Trip and stop-time types.
//!
//! A `Trip` represents one scheduled vehicle run with its ordered stop times.
//! A `StopIndex` provides an unambiguous position within a trip's stop
//! sequence, which matters for loop routes that visit a location twice.

use std::fmt;

use super::{LocationId, ScheduleTime};

/// Identifier of a scheduled trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripId(pub u32);

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a stop within a trip's stop sequence.
///
/// Used instead of `LocationId` to disambiguate trips that stop at the same
/// location more than once (loop routes, out-and-back workings).
///
/// # Examples
///
/// ```
/// use transit_server::domain::StopIndex;
///
/// let idx = StopIndex(0);
/// assert_eq!(idx.next(), StopIndex(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl StopIndex {
    /// Returns the next index.
    pub fn next(self) -> Self {
        StopIndex(self.0 + 1)
    }

    /// Returns the previous index, if any.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(StopIndex)
    }
}

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StopIndex {
    fn from(value: usize) -> Self {
        StopIndex(value)
    }
}

/// A scheduled stop on a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    /// Location the vehicle stops at.
    pub location: LocationId,
    /// Scheduled arrival. At the first stop this equals the departure.
    pub arrival: ScheduleTime,
    /// Scheduled departure. At the final stop this equals the arrival.
    pub departure: ScheduleTime,
}

impl StopTime {
    /// Create a stop time.
    pub fn new(location: LocationId, arrival: ScheduleTime, departure: ScheduleTime) -> Self {
        Self {
            location,
            arrival,
            departure,
        }
    }
}

/// One scheduled vehicle run with its ordered stop times.
#[derive(Debug, Clone)]
pub struct Trip {
    /// Upstream identifier.
    pub id: TripId,
    /// Route number shown to passengers (e.g., "101").
    pub number: String,
    /// Display name (e.g., "Chennai - Madurai Express").
    pub name: String,
    /// Service category (e.g., "Express", "Ordinary", "Deluxe").
    pub category: String,
    /// Stop times in running order.
    pub stops: Vec<StopTime>,
}

impl Trip {
    /// Find the first stop at a location at or after the given index.
    ///
    /// Returns both the index and the stop, allowing unambiguous leg
    /// construction for trips that visit the same location twice.
    pub fn find_stop(&self, location: LocationId, after: StopIndex) -> Option<(StopIndex, &StopTime)> {
        self.stops
            .iter()
            .enumerate()
            .skip(after.0)
            .find(|(_, stop)| stop.location == location)
            .map(|(i, stop)| (StopIndex(i), stop))
    }

    /// Does this trip stop at the given location at or after the given index?
    pub fn stops_at(&self, location: LocationId, after: StopIndex) -> bool {
        self.find_stop(location, after).is_some()
    }

    /// Returns the final stop, if the trip has any stops.
    pub fn final_stop(&self) -> Option<(StopIndex, &StopTime)> {
        self.stops
            .last()
            .map(|stop| (StopIndex(self.stops.len() - 1), stop))
    }

    /// Checks that the stop sequence is feasible for a single vehicle:
    /// arrival never after departure at each stop, and departure never after
    /// the next stop's arrival.
    ///
    /// Trips failing this check are excluded when the schedule index is built.
    pub fn schedule_is_monotonic(&self) -> bool {
        self.stops.iter().all(|s| s.arrival <= s.departure)
            && self
                .stops
                .windows(2)
                .all(|pair| pair[0].departure <= pair[1].arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ScheduleTime {
        ScheduleTime::parse_hhmm(s).unwrap()
    }

    fn trip(stops: &[(u32, &str, &str)]) -> Trip {
        Trip {
            id: TripId(1),
            number: "101".into(),
            name: "Test".into(),
            category: "Express".into(),
            stops: stops
                .iter()
                .map(|(loc, arr, dep)| StopTime::new(LocationId(*loc), time(arr), time(dep)))
                .collect(),
        }
    }

    #[test]
    fn find_stop_first_occurrence() {
        let t = trip(&[
            (1, "09:00", "09:00"),
            (2, "10:00", "10:05"),
            (3, "11:00", "11:00"),
        ]);

        let (idx, stop) = t.find_stop(LocationId(2), StopIndex(0)).unwrap();
        assert_eq!(idx, StopIndex(1));
        assert_eq!(stop.departure, time("10:05"));

        assert!(t.find_stop(LocationId(2), StopIndex(2)).is_none());
        assert!(t.find_stop(LocationId(9), StopIndex(0)).is_none());
    }

    #[test]
    fn find_stop_loop_route() {
        // Location 2 appears twice (loop route)
        let t = trip(&[
            (1, "09:00", "09:00"),
            (2, "09:30", "09:32"),
            (3, "10:00", "10:02"),
            (2, "10:30", "10:32"),
        ]);

        let (first, _) = t.find_stop(LocationId(2), StopIndex(0)).unwrap();
        assert_eq!(first, StopIndex(1));

        let (second, _) = t.find_stop(LocationId(2), StopIndex(2)).unwrap();
        assert_eq!(second, StopIndex(3));
    }

    #[test]
    fn final_stop() {
        let t = trip(&[(1, "09:00", "09:00"), (2, "10:00", "10:00")]);
        let (idx, stop) = t.final_stop().unwrap();
        assert_eq!(idx, StopIndex(1));
        assert_eq!(stop.location, LocationId(2));
    }

    #[test]
    fn monotonic_schedule_accepted() {
        let t = trip(&[
            (1, "09:00", "09:00"),
            (2, "10:00", "10:05"),
            (3, "11:00", "11:00"),
        ]);
        assert!(t.schedule_is_monotonic());
    }

    #[test]
    fn backwards_inter_stop_time_rejected() {
        // Departs stop 1 at 10:05 but "arrives" stop 2 at 09:50
        let t = trip(&[
            (1, "09:00", "10:05"),
            (2, "09:50", "10:00"),
        ]);
        assert!(!t.schedule_is_monotonic());
    }

    #[test]
    fn negative_dwell_rejected() {
        let t = trip(&[
            (1, "09:00", "09:00"),
            (2, "10:00", "09:55"),
            (3, "11:00", "11:00"),
        ]);
        assert!(!t.schedule_is_monotonic());
    }

    #[test]
    fn stop_index_navigation() {
        assert_eq!(StopIndex(3).next(), StopIndex(4));
        assert_eq!(StopIndex(3).prev(), Some(StopIndex(2)));
        assert_eq!(StopIndex(0).prev(), None);
    }
}
