use zeroize::Zeroizing;

use crate::security::{EncryptedRecord, EncryptionError};

/// Authenticated encryption of clipboard history records.
pub trait EncryptionPort: Send + Sync {
    /// Seal `plaintext` into a new record.
    ///
    /// Semantics:
    /// - Empty plaintext -> EncryptionError::InvalidInput
    /// - Fresh random nonce, fresh record id, current capture time
    fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedRecord, EncryptionError>;

    /// Open a record.
    ///
    /// Failure mapping:
    /// - Malformed nonce/tag      -> EncryptionError::CorruptedData
    /// - Tag verification failure -> EncryptionError::AuthenticationFailed
    fn decrypt(&self, record: &EncryptedRecord) -> Result<Zeroizing<Vec<u8>>, EncryptionError>;
}
