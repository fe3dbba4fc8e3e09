use crate::domain::counter::CounterId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TallyError>;

#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Counter not found: {0}")]
    CounterNotFound(CounterId),

    #[error("Invalid counter ID: {0}")]
    InvalidCounterId(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TallyError {
    /// Returns true when the error reports a stale or unknown counter id
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CounterNotFound(_))
    }
}
