//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from request-shape and feed-parsing errors.

use super::{LocationId, TripId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Stop index is out of bounds for the trip
    #[error("invalid stop index: out of bounds")]
    InvalidStopIndex,

    /// Invalid leg construction (e.g., alight before board)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Consecutive legs don't share a connection location
    #[error("legs do not connect: alight at {0}, next boards at {1}")]
    LegsNotConnected(LocationId, LocationId),

    /// The same trip appears in two legs of one route
    #[error("trip {0} used twice in one route")]
    TripReused(TripId),

    /// Route has no legs
    #[error("route must have at least one leg")]
    EmptyRoute,
}
