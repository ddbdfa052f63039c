//! Key material and error types for the encryption domain.
//!
//! Design: a single long-lived MasterKey lives in the platform credential
//! store. It is fetched for every operation and wiped as soon as the
//! operation is done; nothing in the process caches it.

use std::fmt;

use rand::{rngs::OsRng, TryRngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::ports::SecureStorageError;

/// The 256-bit AES-GCM key that encrypts every history record.
///
/// - Not `Clone`: each operation gets its own short-lived copy.
/// - No Serialize/Deserialize.
/// - Wiped on drop.
pub struct MasterKey([u8; MasterKey::LEN]);

impl MasterKey {
    pub const LEN: usize = 32;

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Draw a fresh key from the operating system CSPRNG.
    pub fn generate() -> Result<Self, KeyStoreError> {
        let mut buf = Zeroizing::new([0u8; Self::LEN]);
        OsRng
            .try_fill_bytes(&mut buf[..])
            .map_err(|_| KeyStoreError::RandomSource)?;
        Self::from_bytes(&buf[..])
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyStoreError> {
        if bytes.len() != Self::LEN {
            return Err(KeyStoreError::Corrupt(format!(
                "invalid MasterKey length: expected {}, got {}",
                Self::LEN,
                bytes.len()
            )));
        }
        let mut mk_bytes = [0u8; Self::LEN];
        mk_bytes.copy_from_slice(bytes);
        Ok(MasterKey(mk_bytes))
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterKey([REDACTED])")
    }
}

impl PartialEq for MasterKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for MasterKey {}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Failures of the key custodian.
#[derive(Debug, thiserror::Error)]
pub enum KeyStoreError {
    #[error("credential store failure: {0}")]
    Storage(#[from] SecureStorageError),

    #[error("stored key material is corrupt: {0}")]
    Corrupt(String),

    #[error("secure random source unavailable")]
    RandomSource,
}

/// Failures of the cryptographic engine.
///
/// Messages never carry plaintext; only sizes and shapes.
#[derive(Debug, thiserror::Error)]
pub enum EncryptionError {
    /// Empty, oversized or malformed plaintext.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("key store error: {0}")]
    KeyStore(#[from] KeyStoreError),

    /// Nonce or tag cannot be reconstructed from the record.
    #[error("corrupted record data: {0}")]
    CorruptedData(String),

    /// Tag verification failed: tampering or key mismatch.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("internal crypto failure")]
    CryptoFailure,
}

impl EncryptionError {
    /// Stable, content-free label for logs and notifications.
    pub fn kind(&self) -> &'static str {
        match self {
            EncryptionError::InvalidInput(_) => "invalid_input",
            EncryptionError::KeyStore(_) => "key_store_error",
            EncryptionError::CorruptedData(_) => "corrupted_data",
            EncryptionError::AuthenticationFailed => "authentication_failed",
            EncryptionError::CryptoFailure => "crypto_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_distinct_keys() {
        let a = MasterKey::generate().expect("generate key");
        let b = MasterKey::generate().expect("generate key");
        assert_ne!(a, b);
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        let err = MasterKey::from_bytes(&[1u8; 16]).expect_err("expected Corrupt");
        assert!(matches!(err, KeyStoreError::Corrupt(msg) if msg.contains("expected 32")));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = MasterKey::from_bytes(&[7u8; 32]).expect("key");
        assert_eq!(format!("{key:?}"), "MasterKey([REDACTED])");
    }

    #[test]
    fn error_kind_is_content_free() {
        let err = EncryptionError::InvalidInput("plaintext is empty".into());
        assert_eq!(err.kind(), "invalid_input");
        assert_eq!(EncryptionError::AuthenticationFailed.kind(), "authentication_failed");
    }
}
