//! Atomic snapshot replacement.
//!
//! When the upstream schedule changes, a new snapshot is built and swapped
//! in wholesale. In-flight searches keep the `Arc` they captured and are
//! never affected by a concurrent rebuild.

use std::sync::{Arc, RwLock};

use super::snapshot::ScheduleSnapshot;

/// Holds the current schedule snapshot behind a copy-on-write pointer swap.
///
/// Readers pay one lock acquisition to clone the `Arc`; the search itself
/// runs entirely against the captured snapshot.
#[derive(Debug)]
pub struct SnapshotStore {
    inner: RwLock<Versioned>,
}

#[derive(Debug)]
struct Versioned {
    snapshot: Arc<ScheduleSnapshot>,
    generation: u64,
}

impl SnapshotStore {
    /// Create a store with an initial snapshot (generation 0).
    pub fn new(snapshot: ScheduleSnapshot) -> Self {
        Self {
            inner: RwLock::new(Versioned {
                snapshot: Arc::new(snapshot),
                generation: 0,
            }),
        }
    }

    /// Capture the current snapshot and its generation.
    pub fn current(&self) -> (Arc<ScheduleSnapshot>, u64) {
        let guard = self.inner.read().expect("snapshot lock poisoned");
        (guard.snapshot.clone(), guard.generation)
    }

    /// Replace the snapshot, bumping the generation.
    ///
    /// Returns the new generation number.
    pub fn replace(&self, snapshot: ScheduleSnapshot) -> u64 {
        let mut guard = self.inner.write().expect("snapshot lock poisoned");
        guard.snapshot = Arc::new(snapshot);
        guard.generation += 1;
        guard.generation
    }
}
