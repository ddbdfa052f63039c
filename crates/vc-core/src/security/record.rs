use std::fmt;

use aes_gcm::aead::consts::U12;
use aes_gcm::{Nonce, Tag};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::EncryptionError;
use crate::ids::RecordId;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// One captured clipboard snapshot, sealed with AES-256-GCM.
///
/// Records only come out of [`AeadEngine`](super::AeadEngine) encryption:
/// the fields are private and there is no public constructor, so nonce,
/// tag and ciphertext always belong to the same seal operation.
#[derive(PartialEq, Eq)]
pub struct EncryptedRecord {
    id: RecordId,
    captured_at: DateTime<Utc>,
    ciphertext: Vec<u8>,
    nonce: Vec<u8>,
    tag: Vec<u8>,
}

impl EncryptedRecord {
    pub(crate) fn sealed(
        id: RecordId,
        captured_at: DateTime<Utc>,
        ciphertext: Vec<u8>,
        nonce: [u8; NONCE_LEN],
        tag: [u8; TAG_LEN],
    ) -> Self {
        Self {
            id,
            captured_at,
            ciphertext,
            nonce: nonce.to_vec(),
            tag: tag.to_vec(),
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    /// Ciphertext length, equal to the plaintext's UTF-8 byte length.
    pub fn byte_len(&self) -> usize {
        self.ciphertext.len()
    }

    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            id: self.id.clone(),
            captured_at: self.captured_at,
            byte_len: self.byte_len(),
        }
    }

    /// Rebuild the AEAD nonce and tag from the stored bytes.
    pub(crate) fn aead_parts(&self) -> Result<(&Nonce<U12>, &Tag), EncryptionError> {
        if self.nonce.len() != NONCE_LEN {
            return Err(EncryptionError::CorruptedData(format!(
                "invalid nonce length: expected {NONCE_LEN}, got {}",
                self.nonce.len()
            )));
        }
        if self.tag.len() != TAG_LEN {
            return Err(EncryptionError::CorruptedData(format!(
                "invalid tag length: expected {TAG_LEN}, got {}",
                self.tag.len()
            )));
        }
        Ok((Nonce::from_slice(&self.nonce), Tag::from_slice(&self.tag)))
    }

    #[cfg(test)]
    pub(crate) fn fields_mut(&mut self) -> (&mut Vec<u8>, &mut Vec<u8>, &mut Vec<u8>) {
        (&mut self.ciphertext, &mut self.nonce, &mut self.tag)
    }
}

impl fmt::Debug for EncryptedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedRecord")
            .field("id", &self.id)
            .field("captured_at", &self.captured_at)
            .field("byte_len", &self.ciphertext.len())
            .finish_non_exhaustive()
    }
}

/// Metadata view of a record, safe to hand to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub id: RecordId,
    pub captured_at: DateTime<Utc>,
    pub byte_len: usize,
}
