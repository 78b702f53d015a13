//! Route search orchestration.
//!
//! Validates the request, runs the direct matcher and the transfer walker
//! over the captured snapshot, then merges, deduplicates, ranks and caps
//! the results. The search is a pure function of (snapshot, request);
//! identical inputs produce identical ordered output.

use std::time::Instant;

use crate::domain::{LocationId, Route};
use crate::schedule::ScheduleSnapshot;

use super::config::{SearchConfig, SearchOverrides};
use super::continuation::annotate_continuations;
use super::direct::find_direct_routes;
use super::rank::{deduplicate, rank_routes};
use super::walker::walk;

/// Error from route search. Only request-shape problems are errors; an
/// empty result set is a successful outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Location id not present in the snapshot
    #[error("unknown location id: {0}")]
    UnknownLocation(LocationId),

    /// Origin equals destination
    #[error("origin and destination are the same location")]
    SameOriginDestination,

    /// Effective max transfers is zero
    #[error("max transfers must be at least 1")]
    InvalidMaxTransfers,

    /// Effective max results is zero
    #[error("max results must be at least 1")]
    InvalidMaxResults,
}

/// A route search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Where the traveller starts.
    pub origin: LocationId,

    /// Where the traveller wants to go.
    pub destination: LocationId,

    /// Per-request parameter overrides.
    pub overrides: SearchOverrides,

    /// Optional wall-clock deadline; when it elapses the search returns
    /// whatever it has found, flagged as truncated.
    pub deadline: Option<Instant>,
}

impl SearchRequest {
    /// Create a request with server-default parameters.
    pub fn new(origin: LocationId, destination: LocationId) -> Self {
        Self {
            origin,
            destination,
            overrides: SearchOverrides::default(),
            deadline: None,
        }
    }
}

/// Result of a route search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Routes ranked best-first, capped at the effective max results.
    pub routes: Vec<Route>,

    /// Frontier nodes the walker expanded.
    pub explored: usize,

    /// True when the exploration budget or deadline cut the search short.
    pub truncated: bool,
}

/// Route resolver over one schedule snapshot.
///
/// Borrows the snapshot and configuration; cheap to construct per request.
pub struct Resolver<'a> {
    snapshot: &'a ScheduleSnapshot,
    config: &'a SearchConfig,
}

impl<'a> Resolver<'a> {
    /// Create a resolver.
    pub fn new(snapshot: &'a ScheduleSnapshot, config: &'a SearchConfig) -> Self {
        Self { snapshot, config }
    }

    /// Search for routes from origin to destination.
    ///
    /// # Errors
    ///
    /// Returns `Err` for request-shape problems (unknown locations, origin
    /// equal to destination, zero transfer or result limits). Finding no
    /// route is `Ok` with an empty list.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let config = self.config.with_overrides(&request.overrides);
        self.validate(request, &config)?;

        // Direct matches, annotated with where the vehicle continues to.
        let mut routes = find_direct_routes(self.snapshot, request.origin, request.destination);
        annotate_continuations(self.snapshot, &mut routes);

        // Connecting routes (the walker re-finds direct ones; dedup below
        // keeps the annotated copy, which was merged first).
        let walked = walk(
            self.snapshot,
            request.origin,
            request.destination,
            &config,
            request.deadline,
        );
        routes.extend(walked.routes);

        let routes = deduplicate(routes);
        let mut routes = rank_routes(routes);
        routes.truncate(config.max_results);

        Ok(SearchOutcome {
            routes,
            explored: walked.explored,
            truncated: walked.truncated,
        })
    }

    fn validate(&self, request: &SearchRequest, config: &SearchConfig) -> Result<(), SearchError> {
        if !self.snapshot.contains_location(request.origin) {
            return Err(SearchError::UnknownLocation(request.origin));
        }
        if !self.snapshot.contains_location(request.destination) {
            return Err(SearchError::UnknownLocation(request.destination));
        }
        if request.origin == request.destination {
            return Err(SearchError::SameOriginDestination);
        }
        if config.max_transfers == 0 {
            return Err(SearchError::InvalidMaxTransfers);
        }
        if config.max_results == 0 {
            return Err(SearchError::InvalidMaxResults);
        }
        Ok(())
    }
}
