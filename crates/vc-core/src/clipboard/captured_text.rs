use std::fmt;

use zeroize::Zeroize;

/// Raw text payload as handed over by the platform clipboard.
///
/// Platforms expose text either as UTF-8 bytes or as UTF-16 code units.
/// Neither is trusted to be well-formed until it passes the
/// [`CapturePolicy`](super::CapturePolicy).
pub enum CapturedText {
    Utf8(Vec<u8>),
    Utf16(Vec<u16>),
}

impl CapturedText {
    pub fn is_empty(&self) -> bool {
        match self {
            CapturedText::Utf8(bytes) => bytes.is_empty(),
            CapturedText::Utf16(units) => units.is_empty(),
        }
    }
}

impl From<String> for CapturedText {
    fn from(value: String) -> Self {
        CapturedText::Utf8(value.into_bytes())
    }
}

impl fmt::Debug for CapturedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapturedText::Utf8(bytes) => write!(f, "CapturedText::Utf8({} bytes)", bytes.len()),
            CapturedText::Utf16(units) => write!(f, "CapturedText::Utf16({} units)", units.len()),
        }
    }
}

impl Drop for CapturedText {
    fn drop(&mut self) {
        match self {
            CapturedText::Utf8(bytes) => bytes.zeroize(),
            CapturedText::Utf16(units) => units.zeroize(),
        }
    }
}
