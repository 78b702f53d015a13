//! Continuing-trip annotation.
//!
//! A direct match whose alighting stop is not the trip's terminus gets an
//! informational note naming where the vehicle continues to, e.g.
//! "Express 101, continuing to Madurai". Leg times stay clipped to the
//! requested segment.

use crate::domain::Route;
use crate::schedule::ScheduleSnapshot;

/// Annotate direct routes whose trip continues past the destination.
pub fn annotate_continuations(snapshot: &ScheduleSnapshot, routes: &mut [Route]) {
    for route in routes.iter_mut() {
        if !route.is_direct() {
            continue;
        }

        let leg = &route.legs()[0];
        let Some((final_idx, final_stop)) = leg.trip().final_stop() else {
            continue;
        };

        if leg.alight_idx() < final_idx {
            if let Some(location) = snapshot.location(final_stop.location) {
                route.set_continues_beyond(location.name.clone());
            }
        }
    }
}
