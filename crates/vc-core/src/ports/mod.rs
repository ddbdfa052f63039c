//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (history store,
//! capture handler) and infrastructure/platform implementations. The core
//! stays independent of the keyring, the OS clipboard and the clock.
//!
//! ## Port Placement Guidelines
//!
//! A port belongs here when it represents a capability the history engine
//! needs and it is implemented by the infrastructure or platform layer.

mod clipboard;
mod clipboard_change_handler;
mod clock;
pub mod security;

pub use clipboard::SystemClipboardPort;
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use clock::ClockPort;
pub use security::encryption::EncryptionPort;
pub use security::key_custodian::KeyCustodianPort;
pub use security::secure_storage::{SecureStorageError, SecureStoragePort};

#[cfg(test)]
pub(crate) use security::key_custodian::MockKeyCustodian;
