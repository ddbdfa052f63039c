use std::sync::{Arc, Mutex};

use tracing::{debug, info, info_span, warn};
use vc_core::ports::{KeyCustodianPort, SecureStoragePort};
use vc_core::security::{KeyStoreError, MasterKey};
use zeroize::Zeroizing;

/// Fixed credential-store identifier of the history master key.
pub const MASTER_KEY_ID: &str = "history-master-key:v1";

/// Key custodian backed by a [`SecureStoragePort`].
///
/// The credential store is the single source of truth: nothing is cached
/// here, every call performs exactly one store round trip (two on first use).
pub struct DefaultKeyCustodian {
    storage: Arc<dyn SecureStoragePort>,
    /// Serialises first-use creation so two callers cannot store different keys.
    creation: Mutex<()>,
}

impl DefaultKeyCustodian {
    pub fn new(storage: Arc<dyn SecureStoragePort>) -> Self {
        Self {
            storage,
            creation: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Option<MasterKey>, KeyStoreError> {
        let Some(secret) = self.storage.get(MASTER_KEY_ID)? else {
            return Ok(None);
        };
        let secret = Zeroizing::new(secret);
        MasterKey::from_bytes(&secret).map(Some)
    }

    fn create(&self) -> Result<MasterKey, KeyStoreError> {
        let key = MasterKey::generate()?;
        self.storage.set(MASTER_KEY_ID, key.as_bytes())?;
        info!("generated new history master key");
        Ok(key)
    }
}

impl KeyCustodianPort for DefaultKeyCustodian {
    fn get_or_create_key(&self) -> Result<MasterKey, KeyStoreError> {
        let span = info_span!("infra.key_custodian.get_or_create_key");
        let _enter = span.enter();

        if let Some(key) = self.load()? {
            debug!("loaded history master key");
            return Ok(key);
        }

        let _guard = self.creation.lock().unwrap_or_else(|e| e.into_inner());
        // Another caller may have created it while we waited.
        if let Some(key) = self.load()? {
            return Ok(key);
        }
        self.create()
    }

    fn delete_key(&self) -> Result<(), KeyStoreError> {
        self.storage.delete(MASTER_KEY_ID).map_err(|e| {
            warn!(error = %e, "failed to delete history master key");
            KeyStoreError::from(e)
        })
    }
}
