//! # vc-core
//!
//! Core domain models and business logic for VaultClip.
//!
//! This crate holds the encrypted record model, key material newtypes, the
//! AEAD engine and the ports implemented by the infrastructure and platform
//! layers. It has no OS dependencies.

pub mod clipboard;
pub mod config;
pub mod ids;
pub mod ports;
pub mod security;

// Re-export commonly used types at the crate root
pub use clipboard::{CaptureRejected, CapturePolicy, CapturedText};
pub use config::{ConfigError, HistoryConfig};
pub use ids::RecordId;
pub use security::{
    AeadEngine, EncryptedRecord, EncryptionError, KeyStoreError, MasterKey, RecordSummary,
    SecretString,
};
