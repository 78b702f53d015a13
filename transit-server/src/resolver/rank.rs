//! Route ranking and deduplication.
//!
//! Merged results from the direct matcher and the transfer walker can
//! contain the same itinerary twice. Dedup is by signature (ordered trip
//! ids plus connection points); ranking prefers fewer transfers, then
//! shorter total duration, then earlier departure.

use std::collections::HashSet;

use crate::domain::Route;

/// Remove duplicate itineraries, keeping the first occurrence.
///
/// Order-preserving: when the direct matcher's annotated route and the
/// walker's equivalent both appear, whichever was merged first survives.
pub fn deduplicate(routes: Vec<Route>) -> Vec<Route> {
    let mut seen = HashSet::new();
    routes
        .into_iter()
        .filter(|route| seen.insert(route.signature()))
        .collect()
}

/// Sort routes best-first: transfers ascending, then total duration
/// ascending, then departure time ascending.
pub fn rank_routes(mut routes: Vec<Route>) -> Vec<Route> {
    routes.sort_by_key(|route| {
        (
            route.transfers(),
            route.total_duration(),
            route.departure_time(),
        )
    });
    routes
}
