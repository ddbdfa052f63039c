//! Bounded, newest-first history of encrypted clipboard records.

mod event;
mod store;

pub use event::HistoryEvent;
pub use store::{HistoryStore, EVENT_CHANNEL_CAPACITY};

use vc_core::{EncryptionError, RecordId};

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history item not found: {0}")]
    ItemNotFound(RecordId),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),

    #[error("failed to write to clipboard: {0}")]
    Clipboard(String),
}
