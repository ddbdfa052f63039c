//! Clipboard port - abstracts the system clipboard service
//!
//! The history engine needs three things from the clipboard: the current
//! text, a way to write text back, and a counter that changes whenever the
//! clipboard content changes. Platforms without native change notification
//! are sampled through the counter.

use anyhow::Result;

use crate::clipboard::CapturedText;

pub trait SystemClipboardPort: Send + Sync {
    /// Read the current text payload.
    ///
    /// Returns `Ok(None)` when the clipboard holds no text (images, files,
    /// empty clipboard).
    fn read_text(&self) -> Result<Option<CapturedText>>;

    /// Replace the clipboard content with `text`.
    fn write_text(&self, text: &str) -> Result<()>;

    /// Monotonically increasing counter, bumped on every content change.
    fn change_counter(&self) -> Result<u64>;
}
