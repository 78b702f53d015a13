//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::SearchCache;
use crate::resolver::SearchConfig;
use crate::schedule::SnapshotStore;

/// Shared application state.
///
/// Contains everything needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current schedule snapshot, swapped atomically on reload
    pub store: Arc<SnapshotStore>,

    /// Server-default search configuration
    pub config: Arc<SearchConfig>,

    /// Cache of search outcomes
    pub cache: Arc<SearchCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: SnapshotStore, config: SearchConfig, cache: SearchCache) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            cache: Arc::new(cache),
        }
    }
}
