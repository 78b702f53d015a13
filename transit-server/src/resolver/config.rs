//! Search configuration for the connection resolver.

use chrono::Duration;

/// Configuration parameters for route search.
///
/// These are server-wide defaults; each request may override them through
/// [`SearchOverrides`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of vehicle transfers allowed (legs = transfers + 1).
    pub max_transfers: usize,

    /// Maximum number of routes to return.
    pub max_results: usize,

    /// Minimum time required to change vehicles (minutes).
    /// Connections tighter than this are rejected.
    pub min_transfer_buffer_mins: i64,

    /// Maximum acceptable wait at a connection point (minutes).
    /// Connections beyond this are not suggested.
    pub max_transfer_wait_mins: i64,

    /// Cap on frontier nodes explored per search. Exceeding it returns
    /// partial results flagged as truncated.
    pub max_explored_nodes: usize,
}

impl SearchConfig {
    /// Returns the minimum transfer buffer as a Duration.
    pub fn min_transfer_buffer(&self) -> Duration {
        Duration::minutes(self.min_transfer_buffer_mins)
    }

    /// Returns the maximum transfer wait as a Duration.
    pub fn max_transfer_wait(&self) -> Duration {
        Duration::minutes(self.max_transfer_wait_mins)
    }

    /// Apply per-request overrides on top of these defaults.
    pub fn with_overrides(&self, overrides: &SearchOverrides) -> SearchConfig {
        SearchConfig {
            max_transfers: overrides.max_transfers.unwrap_or(self.max_transfers),
            max_results: overrides.max_results.unwrap_or(self.max_results),
            min_transfer_buffer_mins: overrides
                .min_transfer_buffer_mins
                .unwrap_or(self.min_transfer_buffer_mins),
            max_transfer_wait_mins: overrides
                .max_transfer_wait_mins
                .unwrap_or(self.max_transfer_wait_mins),
            max_explored_nodes: self.max_explored_nodes,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_transfers: 1,
            max_results: 10,
            min_transfer_buffer_mins: 5,
            max_transfer_wait_mins: 240, // 4 hours
            max_explored_nodes: 10_000,
        }
    }
}

/// Per-request parameter overrides. `None` means "use the server default".
#[derive(Debug, Clone, Default)]
pub struct SearchOverrides {
    pub max_transfers: Option<usize>,
    pub max_results: Option<usize>,
    pub min_transfer_buffer_mins: Option<i64>,
    pub max_transfer_wait_mins: Option<i64>,
}
