use keyring::Entry;
use vc_core::ports::{SecureStorageError, SecureStoragePort};

const SERVICE_NAME: &str = "VaultClip";

trait KeyringEntryOps {
    fn get_secret(&self) -> Result<Vec<u8>, keyring::Error>;
    fn set_secret(&self, secret: &[u8]) -> Result<(), keyring::Error>;
    fn delete_credential(&self) -> Result<(), keyring::Error>;
}

trait KeyringBackend {
    type Entry: KeyringEntryOps;
    fn new_entry(&self, service: &str, username: &str) -> Result<Self::Entry, keyring::Error>;
}

struct RealBackend;

struct RealEntry {
    inner: Entry,
}

impl KeyringEntryOps for RealEntry {
    fn get_secret(&self) -> Result<Vec<u8>, keyring::Error> {
        self.inner.get_secret()
    }

    fn set_secret(&self, secret: &[u8]) -> Result<(), keyring::Error> {
        self.inner.set_secret(secret)
    }

    fn delete_credential(&self) -> Result<(), keyring::Error> {
        self.inner.delete_credential()
    }
}

impl KeyringBackend for RealBackend {
    type Entry = RealEntry;

    fn new_entry(&self, service: &str, username: &str) -> Result<Self::Entry, keyring::Error> {
        Entry::new(service, username).map(|inner| RealEntry { inner })
    }
}

/// Map keyring failures onto the port's error kinds.
///
/// `NoStorageAccess` is what the platform reports while the device is
/// locked, so it surfaces as `Unavailable`.
fn map_keyring_error(op: &str, err: keyring::Error) -> SecureStorageError {
    match err {
        keyring::Error::NoStorageAccess(e) => SecureStorageError::Unavailable(e.to_string()),
        keyring::Error::PlatformFailure(e) => SecureStorageError::PermissionDenied(e.to_string()),
        keyring::Error::BadEncoding(_) => {
            SecureStorageError::Corrupt(format!("failed to {op}: secret has bad encoding"))
        }
        other => SecureStorageError::Other(format!("failed to {op}: {other}")),
    }
}

fn entry_for_key<B: KeyringBackend>(backend: &B, key: &str) -> Result<B::Entry, SecureStorageError> {
    backend
        .new_entry(SERVICE_NAME, key)
        .map_err(|e| SecureStorageError::Other(format!("failed to create keyring entry: {e}")))
}

fn get_with_backend<B: KeyringBackend>(
    backend: &B,
    key: &str,
) -> Result<Option<Vec<u8>>, SecureStorageError> {
    let entry = entry_for_key(backend, key)?;
    match entry.get_secret() {
        Ok(secret) => Ok(Some(secret)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(map_keyring_error("read secure storage", err)),
    }
}

fn set_with_backend<B: KeyringBackend>(
    backend: &B,
    key: &str,
    value: &[u8],
) -> Result<(), SecureStorageError> {
    let entry = entry_for_key(backend, key)?;
    entry
        .set_secret(value)
        .map_err(|err| map_keyring_error("write secure storage", err))
}

fn delete_with_backend<B: KeyringBackend>(backend: &B, key: &str) -> Result<(), SecureStorageError> {
    let entry = entry_for_key(backend, key)?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(err) => Err(map_keyring_error("delete secure storage", err)),
    }
}

/// System keychain-backed secure storage.
///
/// macOS Keychain, Windows Credential Manager, or the Linux kernel keyring
/// (persisted through the Secret Service), selected by the `keyring` crate.
#[derive(Debug, Clone, Default)]
pub struct SystemSecureStorage;

impl SystemSecureStorage {
    pub fn new() -> Self {
        Self
    }
}

impl SecureStoragePort for SystemSecureStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SecureStorageError> {
        get_with_backend(&RealBackend, key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), SecureStorageError> {
        set_with_backend(&RealBackend, key, value)
    }

    fn delete(&self, key: &str) -> Result<(), SecureStorageError> {
        delete_with_backend(&RealBackend, key)
    }
}
