//! Schedule ingestion, indexing and snapshot management.
//!
//! The feed layer parses the upstream schedule document; the snapshot
//! builder derives the per-location occurrence index the resolver searches
//! over; the store swaps whole snapshots atomically when the schedule
//! changes.

mod feed;
mod snapshot;
mod store;

pub use feed::{DomainSchedule, FeedError, LocationEntry, ScheduleFeed, StopEntry, TripEntry};
pub use snapshot::{Occurrence, ScheduleSnapshot};
pub use store::SnapshotStore;
