//! # vc-platform
//!
//! Platform-specific implementations for VaultClip.
//!
//! This crate talks to the operating system: the credential store (keyring),
//! the system clipboard, and the tokio runtime that drives the polling
//! change monitor.

pub mod clipboard;
pub mod runtime;
pub mod secure_storage;

pub use clipboard::LocalClipboard;
pub use runtime::{ChangeMonitor, MonitorError, MonitorState};
pub use secure_storage::SystemSecureStorage;
