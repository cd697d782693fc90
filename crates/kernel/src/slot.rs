//! The durable key-value slot the content store persists into.

/// Errors raised by persistence slot backends.
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid slot key '{0}'")]
    InvalidKey(String),
}

/// A synchronous string key-value store.
///
/// Implementations replace values wholesale; there is no partial update.
pub trait PersistenceSlot: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError>;

    /// Remove the value under `key`. Returns `true` if a value existed.
    fn remove(&self, key: &str) -> Result<bool, SlotError>;
}
