//! Clipboard change handler port
//!
//! Callback interface for validated text captured by the change monitor.
//! The platform layer depends on this abstraction; the app layer implements it.

use crate::security::SecretString;

/// Receives one event per detected clipboard text change.
#[async_trait::async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    /// Called with plaintext that already passed the capture policy.
    async fn on_text_captured(&self, text: SecretString);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_change_handler_is_object_safe() {
        fn assert_object_safe(_handler: Option<&dyn ClipboardChangeHandler>) {}
        assert_object_safe(None);
    }
}
