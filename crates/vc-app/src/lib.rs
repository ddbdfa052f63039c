//! Application layer for VaultClip: the encrypted history and the use cases
//! that feed it.

pub mod history;
pub mod usecases;

pub use history::{HistoryError, HistoryEvent, HistoryStore};
pub use usecases::CaptureClipboardText;
