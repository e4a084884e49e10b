use chrono::Utc;
use tracing::info;

use crate::config::{session_eviction_interval, session_ttl_secs};
use crate::state::AppState;

pub async fn run(state: AppState) {
    let ttl_secs = session_ttl_secs();
    let mut interval = tokio::time::interval(session_eviction_interval());

    loop {
        interval.tick().await;

        let evicted = state.evict_idle_sessions(Utc::now(), ttl_secs);
        if evicted > 0 {
            info!(
                "evicted {evicted} idle sessions ({} remaining)",
                state.sessions.len()
            );
        }
    }
}
