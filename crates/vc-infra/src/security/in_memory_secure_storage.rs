use std::collections::HashMap;
use std::sync::Mutex;

use vc_core::ports::{SecureStorageError, SecureStoragePort};
use zeroize::Zeroize;

/// Process-local secure storage.
///
/// Used by tests and by headless environments without an OS keyring. Values
/// are wiped when overwritten, deleted, or when the storage is dropped.
#[derive(Default)]
pub struct InMemorySecureStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemorySecureStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, SecureStorageError> {
        self.entries
            .lock()
            .map_err(|_| SecureStorageError::Unavailable("in-memory storage poisoned".into()))
    }
}

impl SecureStoragePort for InMemorySecureStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SecureStorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), SecureStorageError> {
        if let Some(mut previous) = self.lock()?.insert(key.to_string(), value.to_vec()) {
            previous.zeroize();
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SecureStorageError> {
        if let Some(mut previous) = self.lock()?.remove(key) {
            previous.zeroize();
        }
        Ok(())
    }
}

impl Drop for InMemorySecureStorage {
    fn drop(&mut self) {
        if let Ok(entries) = self.entries.get_mut() {
            entries.values_mut().for_each(|value| value.zeroize());
        }
    }
}
