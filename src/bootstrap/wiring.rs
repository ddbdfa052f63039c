//! Dependency wiring
//!
//! The only place that depends on `vc-infra`, `vc-platform` and `vc-app`
//! at once. It assembles adapters behind their ports and makes no
//! decisions of its own.

use std::sync::Arc;

use tracing::info;
use vc_app::{CaptureClipboardText, HistoryStore};
use vc_core::ports::{KeyCustodianPort, SecureStoragePort, SystemClipboardPort};
use vc_core::{AeadEngine, HistoryConfig};
use vc_infra::{DefaultKeyCustodian, InMemorySecureStorage, SystemClock};
use vc_platform::{ChangeMonitor, LocalClipboard, SystemSecureStorage};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInit(String),
}

/// Where the master key lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStorage {
    /// OS credential store; the key survives restarts.
    #[default]
    System,
    /// Process memory; history from a previous run cannot be reopened.
    InMemory,
}

impl KeyStorage {
    /// `VAULTCLIP_KEY_STORE=memory` selects the in-memory store.
    pub fn from_env() -> Self {
        match std::env::var("VAULTCLIP_KEY_STORE") {
            Ok(value) if value.eq_ignore_ascii_case("memory") => KeyStorage::InMemory,
            _ => KeyStorage::System,
        }
    }

    fn build(self) -> Arc<dyn SecureStoragePort> {
        match self {
            KeyStorage::System => Arc::new(SystemSecureStorage::new()),
            KeyStorage::InMemory => Arc::new(InMemorySecureStorage::new()),
        }
    }
}

pub struct AppDeps {
    pub history: Arc<HistoryStore>,
    pub monitor: ChangeMonitor,
    pub custodian: Arc<dyn KeyCustodianPort>,
}

/// Wire the production adapters.
pub fn wire_dependencies(config: &HistoryConfig, key_storage: KeyStorage) -> WiringResult<AppDeps> {
    let clipboard =
        LocalClipboard::new().map_err(|e| WiringError::ClipboardInit(e.to_string()))?;
    info!(?key_storage, "wiring dependencies");
    Ok(wire_with(config, key_storage.build(), Arc::new(clipboard)))
}

/// Wire the engine around caller-supplied storage and clipboard adapters.
pub fn wire_with(
    config: &HistoryConfig,
    storage: Arc<dyn SecureStoragePort>,
    clipboard: Arc<dyn SystemClipboardPort>,
) -> AppDeps {
    let custodian: Arc<dyn KeyCustodianPort> = Arc::new(DefaultKeyCustodian::new(storage));
    let engine = Arc::new(AeadEngine::new(custodian.clone(), Arc::new(SystemClock)));
    let history = Arc::new(HistoryStore::new(
        engine,
        clipboard.clone(),
        config.history.capacity,
    ));
    let handler = Arc::new(CaptureClipboardText::new(history.clone()));
    let monitor = ChangeMonitor::from_config(clipboard, handler, config);

    AppDeps {
        history,
        monitor,
        custodian,
    }
}
