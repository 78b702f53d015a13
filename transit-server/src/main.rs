use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_server::cache::{CacheConfig, SearchCache};
use transit_server::resolver::SearchConfig;
use transit_server::schedule::{ScheduleFeed, ScheduleSnapshot, SnapshotStore};
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load the initial schedule, if one is configured. The server also
    // accepts a feed over PUT /schedule at runtime.
    let snapshot = match std::env::var("SCHEDULE_FILE") {
        Ok(path) => match ScheduleFeed::load_from_path(&path) {
            Ok(feed) => {
                let schedule = feed.into_domain();
                if schedule.malformed_trips > 0 {
                    warn!(
                        dropped = schedule.malformed_trips,
                        "schedule feed contained malformed trips"
                    );
                }
                let snapshot = ScheduleSnapshot::build(schedule.locations, schedule.trips);
                info!(
                    trips = snapshot.trip_count(),
                    locations = snapshot.location_count(),
                    rejected = snapshot.rejected_trip_count(),
                    "loaded schedule from {path}"
                );
                snapshot
            }
            Err(e) => {
                warn!("failed to load {path}: {e}; starting with an empty schedule");
                ScheduleSnapshot::build(vec![], vec![])
            }
        },
        Err(_) => {
            warn!("SCHEDULE_FILE not set; starting with an empty schedule");
            ScheduleSnapshot::build(vec![], vec![])
        }
    };

    let store = SnapshotStore::new(snapshot);
    let search_config = SearchConfig::default();
    let cache = SearchCache::new(&CacheConfig::default());

    let state = AppState::new(store, search_config, cache);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("transit connection resolver listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}
