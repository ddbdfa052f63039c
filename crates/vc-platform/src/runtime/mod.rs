mod monitor;

pub use monitor::{ChangeMonitor, MonitorError, MonitorState};
