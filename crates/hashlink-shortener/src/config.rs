use hashlink_core::ShortenerError;
use hashlink_generator::{HashChain, HashStage, DEFAULT_CODE_LENGTH};
use std::time::Duration;
use typed_builder::TypedBuilder;

/// TTL attached to every cache write when none is configured.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Tunables of a [`ShorteningEngine`](crate::ShorteningEngine).
///
/// ```
/// use hashlink_shortener::EngineConfig;
/// use std::time::Duration;
///
/// let config = EngineConfig::builder()
///     .code_length(10)
///     .cache_ttl(Duration::from_secs(600))
///     .build();
/// assert!(config.hash_chain().is_ok());
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct EngineConfig {
    /// Symbols per generated code, 6 to 12.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
    /// TTL handed to the cache on every write.
    #[builder(default = DEFAULT_CACHE_TTL)]
    pub cache_ttl: Duration,
    /// Hash stages tried in order when generating candidates.
    #[builder(default = vec![HashStage::Rolling, HashStage::Sha256])]
    pub stages: Vec<HashStage>,
}

impl EngineConfig {
    /// Builds the hash chain described by this config, rejecting an
    /// out-of-range code length or an empty stage list.
    pub fn hash_chain(&self) -> Result<HashChain, ShortenerError> {
        HashChain::new(self.stages.clone(), self.code_length)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
