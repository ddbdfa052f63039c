mod in_memory_secure_storage;
mod key_custodian;

pub use in_memory_secure_storage::InMemorySecureStorage;
pub use key_custodian::{DefaultKeyCustodian, MASTER_KEY_ID};
