use std::fmt;
use std::ops::Deref;
use zeroize::Zeroize;

/// Plaintext clipboard text that must never be logged, cloned, or serialized.
///
/// - Not `Clone`
/// - Not `Serialize` / `Deserialize`
/// - `Debug` / `Display` never print the real content
/// - Wiped on drop
pub struct SecretString {
    inner: String,
}

impl SecretString {
    pub fn new(value: String) -> Self {
        Self { inner: value }
    }

    /// Take ownership of decrypted bytes, wiping them if they are not UTF-8.
    ///
    /// The rejected buffer is zeroed before the error is returned, so callers
    /// only learn that decoding failed, never what was inside.
    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self, std::str::Utf8Error> {
        match String::from_utf8(bytes) {
            Ok(inner) => Ok(Self { inner }),
            Err(err) => {
                let utf8_error = err.utf8_error();
                let mut bytes = err.into_bytes();
                bytes.zeroize();
                Err(utf8_error)
            }
        }
    }

    /// Borrow the inner secret as &str.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Size of the secret in UTF-8 bytes. Safe to log.
    pub fn byte_len(&self) -> usize {
        self.inner.len()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Deref for SecretString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.expose()
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}
