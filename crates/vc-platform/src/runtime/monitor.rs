//! Clipboard change monitor
//!
//! Polls the system clipboard's change counter on a fixed interval and hands
//! validated text to a [`ClipboardChangeHandler`]. The monitor is a sampling
//! design: several changes between two polls surface as a single capture of
//! whatever the clipboard holds at poll time.
//!
//! ```text
//! SystemClipboardPort ──counter/text──▶ ChangeMonitor ──SecretString──▶ ClipboardChangeHandler
//! ```
//!
//! The monitor does not decide what happens to a capture; it only filters
//! out payloads the [`CapturePolicy`] rejects.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::{self, JoinHandle};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vc_core::ports::{ClipboardChangeHandler, SystemClipboardPort};
use vc_core::{CapturePolicy, HistoryConfig};

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("change monitor must be started from within a tokio runtime")]
    NoRuntime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Armed,
}

enum Run {
    Idle,
    Armed {
        cancel: CancellationToken,
        task: JoinHandle<()>,
    },
}

pub struct ChangeMonitor {
    clipboard: Arc<dyn SystemClipboardPort>,
    handler: Arc<dyn ClipboardChangeHandler>,
    policy: CapturePolicy,
    poll_interval: Duration,
    run: Mutex<Run>,
}

impl ChangeMonitor {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        handler: Arc<dyn ClipboardChangeHandler>,
        policy: CapturePolicy,
        poll_interval: Duration,
    ) -> Self {
        Self {
            clipboard,
            handler,
            policy,
            poll_interval,
            run: Mutex::new(Run::Idle),
        }
    }

    pub fn from_config(
        clipboard: Arc<dyn SystemClipboardPort>,
        handler: Arc<dyn ClipboardChangeHandler>,
        config: &HistoryConfig,
    ) -> Self {
        Self::new(
            clipboard,
            handler,
            config.capture_policy(),
            config.poll_interval(),
        )
    }

    fn lock_run(&self) -> MutexGuard<'_, Run> {
        self.run.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Arm the monitor.
    ///
    /// The current change counter becomes the baseline, so whatever is on
    /// the clipboard right now is not captured. Calling `start` on an armed
    /// monitor is a no-op.
    pub fn start(&self) -> Result<(), MonitorError> {
        let mut run = self.lock_run();
        if let Run::Armed { task, .. } = &*run {
            if !task.is_finished() {
                debug!("clipboard change monitor already armed");
                return Ok(());
            }
        }

        let handle = Handle::try_current().map_err(|_| MonitorError::NoRuntime)?;
        let baseline = self
            .clipboard
            .change_counter()
            .map_err(|e| MonitorError::Clipboard(e.to_string()))?;

        let cancel = CancellationToken::new();
        let poller = Poller {
            clipboard: Arc::clone(&self.clipboard),
            handler: Arc::clone(&self.handler),
            policy: self.policy,
            last_seen: baseline,
        };
        let task = handle.spawn(poller.run(self.poll_interval, cancel.clone()));
        *run = Run::Armed { cancel, task };

        info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            max_capture_bytes = self.policy.max_bytes,
            "clipboard change monitor armed"
        );
        Ok(())
    }

    /// Disarm the monitor. No tick starts after this returns; a tick that is
    /// already running finishes, including its handler call.
    pub fn stop(&self) {
        let previous = std::mem::replace(&mut *self.lock_run(), Run::Idle);
        if let Run::Armed { cancel, .. } = previous {
            cancel.cancel();
            info!("clipboard change monitor stopped");
        }
    }

    pub fn state(&self) -> MonitorState {
        match &*self.lock_run() {
            Run::Armed { task, .. } if !task.is_finished() => MonitorState::Armed,
            _ => MonitorState::Idle,
        }
    }
}

impl Drop for ChangeMonitor {
    fn drop(&mut self) {
        if let Run::Armed { cancel, .. } = &*self.lock_run() {
            cancel.cancel();
        }
    }
}

struct Poller {
    clipboard: Arc<dyn SystemClipboardPort>,
    handler: Arc<dyn ClipboardChangeHandler>,
    policy: CapturePolicy,
    last_seen: u64,
}

impl Poller {
    async fn run(mut self, period: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the baseline already covers it.
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }
            // Outside the select so cancellation never cuts a tick short.
            self.tick().await;
        }

        debug!("clipboard poller exited");
    }

    async fn tick(&mut self) {
        let counter = match self.off_runtime(|clipboard| clipboard.change_counter()).await {
            Ok(counter) => counter,
            Err(err) => {
                warn!(error = %err, "failed to read clipboard change counter, skipping tick");
                return;
            }
        };
        if counter == self.last_seen {
            return;
        }

        let captured = match self.off_runtime(|clipboard| clipboard.read_text()).await {
            Ok(captured) => captured,
            Err(err) => {
                warn!(counter, error = %err, "failed to read clipboard text, skipping tick");
                return;
            }
        };
        self.last_seen = counter;

        let Some(captured) = captured else {
            debug!(counter, "clipboard changed to a non-text payload");
            return;
        };

        match self.policy.validate(captured) {
            Ok(text) => {
                debug!(counter, bytes = text.byte_len(), "clipboard text captured");
                self.handler.on_text_captured(text).await;
            }
            Err(reason) => {
                debug!(counter, %reason, "clipboard text not captured");
            }
        }
    }

    /// Run a clipboard call on the blocking pool; platform clipboard APIs
    /// may wait on the window server.
    async fn off_runtime<T, F>(&self, op: F) -> anyhow::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SystemClipboardPort) -> anyhow::Result<T> + Send + 'static,
    {
        let clipboard = Arc::clone(&self.clipboard);
        task::spawn_blocking(move || op(clipboard.as_ref()))
            .await
            .map_err(anyhow::Error::from)?
    }
}
