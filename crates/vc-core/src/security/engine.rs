//! AES-256-GCM engine for clipboard history records.
//!
//! The engine is stateless apart from a monotonic capture clock. Each call
//! asks the key custodian for the master key, builds a cipher, and lets the
//! key copy drop (and wipe) before returning.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, TryRngCore};
use tracing::debug;
use zeroize::Zeroizing;

use super::aad;
use super::record::{EncryptedRecord, NONCE_LEN, TAG_LEN};
use super::EncryptionError;
use crate::ids::RecordId;
use crate::ports::{ClockPort, EncryptionPort, KeyCustodianPort};

pub struct AeadEngine {
    custodian: Arc<dyn KeyCustodianPort>,
    clock: Arc<dyn ClockPort>,
    last_captured_ms: AtomicI64,
}

impl AeadEngine {
    pub fn new(custodian: Arc<dyn KeyCustodianPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            custodian,
            clock,
            last_captured_ms: AtomicI64::new(i64::MIN),
        }
    }

    fn cipher(&self) -> Result<Aes256Gcm, EncryptionError> {
        let key = self.custodian.get_or_create_key()?;
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| EncryptionError::CryptoFailure)
    }

    /// Capture timestamps never go backwards, even if the wall clock does.
    fn next_capture_time(&self) -> DateTime<Utc> {
        let now = self.clock.now_ms();
        let prev = self.last_captured_ms.fetch_max(now, Ordering::SeqCst);
        DateTime::from_timestamp_millis(now.max(prev)).unwrap_or_else(Utc::now)
    }
}

impl EncryptionPort for AeadEngine {
    fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedRecord, EncryptionError> {
        if plaintext.is_empty() {
            return Err(EncryptionError::InvalidInput("plaintext is empty".into()));
        }

        let cipher = self.cipher()?;

        let mut nonce = [0u8; NONCE_LEN];
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|_| EncryptionError::CryptoFailure)?;

        let id = RecordId::new();
        let aad = aad::for_record(&id);

        // Sealed in place: the buffer holds plaintext until the call succeeds.
        let mut buffer = Zeroizing::new(plaintext.to_vec());
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(&nonce), &aad, &mut buffer)
            .map_err(|_| EncryptionError::CryptoFailure)?;

        let mut tag_bytes = [0u8; TAG_LEN];
        tag_bytes.copy_from_slice(&tag);
        let ciphertext = std::mem::take(&mut *buffer);

        debug!(record_id = %id, bytes = ciphertext.len(), "sealed clipboard record");

        Ok(EncryptedRecord::sealed(
            id,
            self.next_capture_time(),
            ciphertext,
            nonce,
            tag_bytes,
        ))
    }

    fn decrypt(&self, record: &EncryptedRecord) -> Result<Zeroizing<Vec<u8>>, EncryptionError> {
        let (nonce, tag) = record.aead_parts()?;
        let cipher = self.cipher()?;
        let aad = aad::for_record(record.id());

        let mut scratch = Zeroizing::new(record.ciphertext().to_vec());
        cipher
            .decrypt_in_place_detached(nonce, &aad, &mut scratch, tag)
            .map_err(|_| EncryptionError::AuthenticationFailed)?;

        debug!(record_id = %record.id(), bytes = scratch.len(), "opened clipboard record");

        Ok(Zeroizing::new(scratch.to_vec()))
    }
}
