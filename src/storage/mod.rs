//! Opaque key-value persistence used to cache the ledger between sessions.

pub mod json_backend;
pub mod memory_backend;

use std::sync::Arc;

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Fixed keys the ledger snapshot is written under.
pub mod keys {
    pub const TRANSACTIONS: &str = "transactions";
    pub const CURRENT_BALANCE: &str = "currentBalance";
    pub const ALERT_RULES: &str = "alertRules";
    pub const ACHIEVEMENTS: &str = "achievements";

    pub const ALL: [&str; 4] = [TRANSACTIONS, CURRENT_BALANCE, ALERT_RULES, ACHIEVEMENTS];
}

/// Abstraction over blob stores capable of holding the ledger snapshot.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    /// Reads a number stored with [`KeyValueStore::set_double`]. `None` when absent.
    fn get_double(&self, key: &str) -> Result<Option<f64>> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn set_double(&self, key: &str, value: f64) -> Result<()> {
        let bytes = serde_json::to_vec(&value)?;
        self.set(key, &bytes)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn get_double(&self, key: &str) -> Result<Option<f64>> {
        (**self).get_double(key)
    }

    fn set_double(&self, key: &str, value: f64) -> Result<()> {
        (**self).set_double(key, value)
    }
}

pub use json_backend::JsonFileStore;
pub use memory_backend::MemoryStore;
