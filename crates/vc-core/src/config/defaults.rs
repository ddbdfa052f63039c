use super::{HistorySettings, MonitorSettings};
use crate::clipboard::DEFAULT_MAX_CAPTURE_BYTES;

pub const DEFAULT_CAPACITY: usize = 100;
/// Upper bound on `history.capacity`.
pub const MAX_CAPACITY: usize = 10_000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_capture_bytes: DEFAULT_MAX_CAPTURE_BYTES,
        }
    }
}
