use std::time::Duration;

use planvision_db::repositories::SessionRepository;
use planvision_db::Repositories;
use tokio::task::JoinHandle;

/// Delete expired sessions every `period` until the task is aborted.
pub fn spawn_expired_session_sweep(repos: Repositories, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match repos.sessions.delete_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Expired sessions removed"),
                Err(e) => tracing::warn!(error = %e, "Expired session sweep failed"),
            }
        }
    })
}
