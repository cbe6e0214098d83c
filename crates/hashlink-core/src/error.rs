use thiserror::Error;

/// Result type for engine-level operations.
pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation timed out: {0}")]
    Timeout(String),
    #[error("cache serialization failed: {0}")]
    Serialization(String),
    #[error("cache value is invalid: {0}")]
    InvalidData(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("short code is contended: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors surfaced by the shortening engine to its callers.
///
/// Cache failures never appear here; they degrade to a miss or a no-op
/// inside the engine.
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    /// Malformed URL, malformed short code or invalid engine configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Every candidate of the hash chain collided with a different URL.
    #[error("could not resolve collision for '{url}' after {attempts} candidates")]
    CollisionUnresolved { url: String, attempts: usize },
    /// The durable store failed; propagated unchanged, never retried here.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),
}

impl ShortenerError {
    /// Returns `true` if the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ShortenerError::InvalidInput(_))
    }
}
