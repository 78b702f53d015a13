//! Domain types for the transit connection resolver.
//!
//! This module contains the core domain model types that represent validated
//! schedule data. Types enforce their invariants at construction time, so
//! code that receives them can trust their validity.

mod error;
mod leg;
mod location;
mod route;
mod time;
mod trip;

pub use error::DomainError;
pub use leg::Leg;
pub use location::{Coordinates, Location, LocationId};
pub use route::{Route, RouteKind, RouteSignature};
pub use time::{ScheduleTime, TimeError};
pub use trip::{StopIndex, StopTime, Trip, TripId};
