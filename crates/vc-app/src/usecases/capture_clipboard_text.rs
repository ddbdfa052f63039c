//! Use case for storing text captured by the clipboard change monitor

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info_span, Instrument};
use vc_core::ports::ClipboardChangeHandler;
use vc_core::security::SecretString;

use crate::history::HistoryStore;

/// Feeds validated clipboard captures into the [`HistoryStore`].
///
/// Registered with the change monitor as its [`ClipboardChangeHandler`].
pub struct CaptureClipboardText {
    history: Arc<HistoryStore>,
}

impl CaptureClipboardText {
    pub fn new(history: Arc<HistoryStore>) -> Self {
        Self { history }
    }
}

#[async_trait]
impl ClipboardChangeHandler for CaptureClipboardText {
    async fn on_text_captured(&self, text: SecretString) {
        let span = info_span!("usecase.capture_clipboard_text.execute", bytes = text.byte_len());
        self.history.add(text).instrument(span).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryEvent;
    use vc_core::AeadEngine;
    use vc_infra::{DefaultKeyCustodian, InMemorySecureStorage, SystemClock};

    struct NoClipboard;

    impl vc_core::ports::SystemClipboardPort for NoClipboard {
        fn read_text(&self) -> anyhow::Result<Option<vc_core::CapturedText>> {
            Ok(None)
        }

        fn write_text(&self, _text: &str) -> anyhow::Result<()> {
            Ok(())
        }

        fn change_counter(&self) -> anyhow::Result<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn captured_text_lands_in_history() {
        let custodian = Arc::new(DefaultKeyCustodian::new(Arc::new(
            InMemorySecureStorage::new(),
        )));
        let engine = Arc::new(AeadEngine::new(custodian, Arc::new(SystemClock)));
        let history = Arc::new(HistoryStore::new(engine, Arc::new(NoClipboard), 10));
        let mut events = history.subscribe();

        let handler: Arc<dyn ClipboardChangeHandler> =
            Arc::new(CaptureClipboardText::new(history.clone()));
        handler.on_text_captured(SecretString::from("copied")).await;

        let summaries = history.list().await;
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].byte_len, "copied".len());
        assert_eq!(
            events.try_recv().expect("added event"),
            HistoryEvent::Added {
                id: summaries[0].id.clone()
            }
        );
        let text = history.get_plaintext(&summaries[0].id).await.expect("plaintext");
        assert_eq!(text.expose(), "copied");
    }
}
