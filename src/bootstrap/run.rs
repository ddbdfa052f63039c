use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use vc_app::HistoryEvent;

use super::AppDeps;

/// Run headless until Ctrl-C: arm the monitor, log history notifications,
/// then disarm and wipe the history on shutdown.
pub async fn run_app(deps: AppDeps) -> anyhow::Result<()> {
    let AppDeps {
        history, monitor, ..
    } = deps;

    let mut events = history.subscribe();
    let observer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(HistoryEvent::CaptureDropped { kind }) => {
                    warn!(kind, "clipboard capture dropped");
                }
                Ok(event) => debug!(?event, "history changed"),
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "history observer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    monitor.start()?;
    info!(capacity = history.capacity(), "VaultClip running, press Ctrl-C to exit");

    tokio::signal::ctrl_c().await?;

    monitor.stop();
    let removed = history.clear().await;
    observer.abort();
    info!(removed, "VaultClip stopped");
    Ok(())
}
