//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::cache::SearchKey;
use crate::resolver::{Resolver, SearchError};
use crate::schedule::{ScheduleFeed, ScheduleSnapshot};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/routes/search", get(search_routes))
        .route("/schedule", put(replace_schedule))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search for routes between two locations.
///
/// An empty route list is a successful response; only request-shape
/// problems produce error statuses.
async fn search_routes(
    State(state): State<AppState>,
    Query(params): Query<SearchRouteParams>,
) -> Result<Json<SearchRouteResponse>, AppError> {
    let request = params.into_request();

    let (snapshot, generation) = state.store.current();
    let key = SearchKey::new(generation, &request);

    let outcome = match state.cache.get(&key).await {
        Some(hit) => hit,
        None => {
            let resolver = Resolver::new(&snapshot, &state.config);
            let outcome = Arc::new(resolver.search(&request)?);
            state.cache.insert(key, outcome.clone()).await;
            outcome
        }
    };

    Ok(Json(SearchRouteResponse {
        routes: outcome.routes.iter().map(RouteResult::from_route).collect(),
        truncated: outcome.truncated,
    }))
}

/// Replace the schedule snapshot from a feed document.
async fn replace_schedule(
    State(state): State<AppState>,
    Json(feed): Json<ScheduleFeed>,
) -> Json<ScheduleLoadResponse> {
    let schedule = feed.into_domain();
    let malformed = schedule.malformed_trips;

    let snapshot = ScheduleSnapshot::build(schedule.locations, schedule.trips);
    let locations = snapshot.location_count();
    let trips_indexed = snapshot.trip_count();
    let trips_rejected = snapshot.rejected_trip_count() + malformed;

    let generation = state.store.replace(snapshot);
    info!(generation, trips_indexed, trips_rejected, "installed schedule snapshot");

    Json(ScheduleLoadResponse {
        generation,
        locations,
        trips_indexed,
        trips_rejected,
    })
}

/// Application-level error mapped to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::UnknownLocation(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
