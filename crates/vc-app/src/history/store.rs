use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tokio::task;
use tracing::{debug, info, info_span, warn, Instrument};
use vc_core::ports::{EncryptionPort, SystemClipboardPort};
use vc_core::security::SecretString;
use vc_core::{EncryptedRecord, EncryptionError, RecordId, RecordSummary};

use super::{HistoryError, HistoryEvent};

/// Buffered notifications per subscriber before the slowest one lags.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// In-memory clipboard history.
///
/// Holds at most `capacity` [`EncryptedRecord`]s, newest first. Plaintext
/// only exists transiently: while a capture is being sealed, and while a
/// record is opened for [`get_plaintext`](Self::get_plaintext) or
/// [`paste`](Self::paste).
///
/// `add` holds the write lock across encrypt, prepend and trim, so readers
/// never see a half-applied capture and `clear` cannot interleave with one.
pub struct HistoryStore {
    engine: Arc<dyn EncryptionPort>,
    clipboard: Arc<dyn SystemClipboardPort>,
    capacity: usize,
    records: RwLock<VecDeque<EncryptedRecord>>,
    events: broadcast::Sender<HistoryEvent>,
}

impl HistoryStore {
    /// A `capacity` of zero is raised to one.
    pub fn new(
        engine: Arc<dyn EncryptionPort>,
        clipboard: Arc<dyn SystemClipboardPort>,
        capacity: usize,
    ) -> Self {
        let capacity = capacity.max(1);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            engine,
            clipboard,
            capacity,
            records: RwLock::new(VecDeque::new()),
            events,
        }
    }

    /// Seal `plaintext` and put it at the front of the history.
    ///
    /// Encryption failures are not returned: the capture is dropped, logged
    /// by kind, and announced as [`HistoryEvent::CaptureDropped`]. Returns
    /// the id of the stored record.
    pub async fn add(&self, plaintext: SecretString) -> Option<RecordId> {
        let span = info_span!("history.add", bytes = plaintext.byte_len());

        async move {
            let mut records = self.records.write().await;

            // The engine talks to the credential store; keep that off the async workers.
            let engine = Arc::clone(&self.engine);
            let sealed =
                task::spawn_blocking(move || engine.encrypt(plaintext.expose().as_bytes())).await;

            let record = match sealed {
                Ok(Ok(record)) => record,
                Ok(Err(err)) => {
                    warn!(kind = err.kind(), "capture dropped: encryption failed");
                    self.notify(HistoryEvent::CaptureDropped { kind: err.kind() });
                    return None;
                }
                Err(err) => {
                    let kind = EncryptionError::CryptoFailure.kind();
                    warn!(kind, error = %err, "capture dropped: encryption task failed");
                    self.notify(HistoryEvent::CaptureDropped { kind });
                    return None;
                }
            };

            let id = record.id().clone();
            records.push_front(record);
            let evicted = if records.len() > self.capacity {
                records.pop_back().map(|old| old.id().clone())
            } else {
                None
            };

            // Published under the write lock so subscribers observe store order.
            debug!(record_id = %id, len = records.len(), "record added");
            self.notify(HistoryEvent::Added { id: id.clone() });
            if let Some(old) = evicted {
                debug!(record_id = %old, "oldest record evicted");
                self.notify(HistoryEvent::Evicted { id: old });
            }
            drop(records);

            Some(id)
        }
        .instrument(span)
        .await
    }

    /// Metadata of every record, newest first.
    pub async fn list(&self) -> Vec<RecordSummary> {
        self.records
            .read()
            .await
            .iter()
            .map(EncryptedRecord::summary)
            .collect()
    }

    /// Decrypt one record.
    ///
    /// Engine errors are returned as they are; nothing is retried. A record
    /// that decrypts to bytes that are not UTF-8 is reported as
    /// [`EncryptionError::CorruptedData`].
    pub async fn get_plaintext(&self, id: &RecordId) -> Result<SecretString, HistoryError> {
        let records = self.records.read().await;
        let record = records
            .iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| HistoryError::ItemNotFound(id.clone()))?;

        let mut bytes = self.engine.decrypt(record)?;
        drop(records);

        SecretString::from_utf8(std::mem::take(&mut *bytes)).map_err(|_| {
            HistoryError::Encryption(EncryptionError::CorruptedData(
                "decrypted record is not valid UTF-8".into(),
            ))
        })
    }

    /// Put a record's plaintext back on the system clipboard.
    pub async fn paste(&self, id: &RecordId) -> Result<(), HistoryError> {
        let span = info_span!("history.paste", record_id = %id);

        async move {
            let text = self.get_plaintext(id).await?;
            self.clipboard
                .write_text(text.expose())
                .map_err(|e| HistoryError::Clipboard(e.to_string()))?;
            info!(bytes = text.byte_len(), "record pasted to clipboard");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Drop every record. Returns how many were removed.
    pub async fn clear(&self) -> usize {
        let mut records = self.records.write().await;
        let removed = records.len();
        records.clear();
        self.notify(HistoryEvent::Cleared { removed });
        drop(records);

        info!(removed, "history cleared");
        removed
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.events.subscribe()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn notify(&self, event: HistoryEvent) {
        // Err only means nobody is subscribed.
        let _ = self.events.send(event);
    }
}
