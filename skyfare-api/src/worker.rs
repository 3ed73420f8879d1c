use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::info;

use crate::state::SessionStore;

/// Periodically evicts idle search sessions until the handle is aborted.
pub fn start_session_sweeper(sessions: SessionStore, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Session sweeper started, running every {:?}", every);
        loop {
            sleep(every).await;
            let (removed, remaining) = {
                let mut sessions = sessions.write().await;
                (sessions.cleanup_expired(Instant::now()), sessions.len())
            };
            if removed > 0 {
                info!("Evicted {} idle sessions, {} remaining", removed, remaining);
            }
        }
    })
}
