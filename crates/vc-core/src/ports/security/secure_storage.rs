use thiserror::Error;

/// Secure storage errors.
#[derive(Debug, Error)]
pub enum SecureStorageError {
    /// Secure storage is unavailable on this platform (or the device is locked).
    #[error("secure storage unavailable: {0}")]
    Unavailable(String),

    /// Access was denied by the platform (permissions/ACL).
    #[error("secure storage access denied: {0}")]
    PermissionDenied(String),

    /// Stored data is corrupt or invalid.
    #[error("secure storage data corrupt: {0}")]
    Corrupt(String),

    /// Other storage failures.
    #[error("secure storage failed: {0}")]
    Other(String),
}

/// Secure storage port for small secrets, keyed by a constant identifier.
///
/// Implementations return owned buffers; callers are responsible for wiping
/// them once the secret has been consumed.
pub trait SecureStoragePort: Send + Sync {
    /// Get a value by key. `Ok(None)` means not found.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SecureStorageError>;

    /// Set a value by key, overwriting any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), SecureStorageError>;

    /// Delete a value by key. Deleting a missing key succeeds.
    fn delete(&self, key: &str) -> Result<(), SecureStorageError>;
}
