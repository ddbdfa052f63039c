use crate::security::{KeyStoreError, MasterKey};

/// Owner of the single long-lived master key.
pub trait KeyCustodianPort: Send + Sync {
    /// Load the master key, creating and storing it on first use.
    ///
    /// Error semantics:
    /// - Missing key      : generated, stored, returned (not an error)
    /// - Store failure    : KeyStoreError::Storage
    /// - Wrong key length : KeyStoreError::Corrupt
    fn get_or_create_key(&self) -> Result<MasterKey, KeyStoreError>;

    /// Delete the master key. Idempotent.
    ///
    /// Used in test teardown only.
    fn delete_key(&self) -> Result<(), KeyStoreError>;
}

#[cfg(test)]
mockall::mock! {
    pub KeyCustodian {}

    impl KeyCustodianPort for KeyCustodian {
        fn get_or_create_key(&self) -> Result<MasterKey, KeyStoreError>;
        fn delete_key(&self) -> Result<(), KeyStoreError>;
    }
}
