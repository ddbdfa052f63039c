//! Capture policy: which clipboard text is allowed into the history.

use super::CapturedText;
use crate::security::SecretString;

/// Largest capture accepted by default, in UTF-8 bytes.
pub const DEFAULT_MAX_CAPTURE_BYTES: usize = 1_000_000;

/// Why a clipboard payload was not captured. Never carries content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureRejected {
    #[error("clipboard text is empty")]
    Empty,

    #[error("clipboard text too large: {len} bytes exceeds limit of {max} bytes")]
    TooLarge { len: usize, max: usize },

    #[error("clipboard text is not well-formed {encoding}")]
    Malformed { encoding: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturePolicy {
    pub max_bytes: usize,
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_CAPTURE_BYTES,
        }
    }
}

impl CapturePolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Decode and check a payload.
    ///
    /// Rules, in order:
    /// 1. well-formed UTF-8 / UTF-16
    /// 2. non-empty
    /// 3. at most `max_bytes` UTF-8 bytes
    ///
    /// Rejected content is wiped before returning.
    pub fn validate(&self, captured: CapturedText) -> Result<SecretString, CaptureRejected> {
        let text = match &captured {
            CapturedText::Utf8(bytes) => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| CaptureRejected::Malformed { encoding: "UTF-8" })?,
            CapturedText::Utf16(units) => String::from_utf16(units)
                .map_err(|_| CaptureRejected::Malformed { encoding: "UTF-16" })?,
        };
        drop(captured);

        let secret = SecretString::new(text);
        if secret.is_empty() {
            return Err(CaptureRejected::Empty);
        }
        if secret.byte_len() > self.max_bytes {
            return Err(CaptureRejected::TooLarge {
                len: secret.byte_len(),
                max: self.max_bytes,
            });
        }
        Ok(secret)
    }
}
