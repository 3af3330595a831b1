use thiserror::Error;

/// Error type that captures storage and configuration failures.
///
/// The ledger manager never hands these to its caller; they surface only from
/// the storage backends and the config manager.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
