//! Startup reachability check.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::TutorClient;
use crate::app::AppMessage;
use crate::traits::HttpClient;

/// Probe `GET /` in the background and report the result to the UI.
///
/// Never blocks startup: the conversation is usable either way, the header
/// just shows whether the backend answered.
pub fn spawn_health_check<C>(
    client: Arc<TutorClient<C>>,
    tx: mpsc::UnboundedSender<AppMessage>,
) -> JoinHandle<()>
where
    C: HttpClient + 'static,
{
    tokio::spawn(async move {
        let healthy = match client.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!(base_url = %client.base_url(), error = %e, "backend unreachable");
                false
            }
        };
        tracing::info!(base_url = %client.base_url(), healthy, "health check finished");
        let _ = tx.send(AppMessage::ConnectionStatus(healthy));
    })
}
