//! Web layer for the transit connection resolver.
//!
//! Provides HTTP endpoints for searching routes and replacing the schedule.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
