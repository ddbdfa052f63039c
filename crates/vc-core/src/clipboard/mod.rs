mod captured_text;
mod policy;

pub use captured_text::CapturedText;
pub use policy::{CapturePolicy, CaptureRejected, DEFAULT_MAX_CAPTURE_BYTES};
