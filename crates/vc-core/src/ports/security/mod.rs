pub mod encryption;
pub mod key_custodian;
pub mod secure_storage;
