pub mod aad;
mod engine;
mod model;
mod record;
mod secret;

pub use engine::AeadEngine;
pub use model::{EncryptionError, KeyStoreError, MasterKey};
pub use record::{EncryptedRecord, RecordSummary, NONCE_LEN, TAG_LEN};
pub use secret::SecretString;
