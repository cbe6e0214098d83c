use crate::config::EngineConfig;
use async_trait::async_trait;
use hashlink_core::error::Result;
use hashlink_core::url::validate_url;
use hashlink_core::{
    InsertOutcome, Repository, ShortCode, ShortenOutcome, Shortener, ShortenerError, UrlCache,
    UrlMapping, UrlRecord,
};
use hashlink_generator::HashChain;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Hash-chain URL shortener over a durable repository and a best-effort cache.
///
/// - Shorten walks the chain and claims the first candidate whose slot is
///   free or already holds the same URL.
/// - Resolve is cache-aside: cache first, then the repository, refilling the
///   cache on a repository hit.
/// - Delete is decided by the repository alone; the cache entry is evicted
///   afterwards.
/// - List reads the repository directly.
///
/// Cache failures are logged and otherwise ignored. Repository failures are
/// returned unchanged as [`ShortenerError::StoreUnavailable`].
pub struct ShorteningEngine<R: ?Sized, C: ?Sized> {
    repository: Arc<R>,
    cache: Arc<C>,
    chain: HashChain,
    cache_ttl: Duration,
}

impl<R: ?Sized, C: ?Sized> Clone for ShorteningEngine<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
            chain: self.chain.clone(),
            cache_ttl: self.cache_ttl,
        }
    }
}

impl<R: Repository, C: UrlCache> ShorteningEngine<R, C> {
    /// Creates an engine owning `repository` and `cache`.
    pub fn new(repository: R, cache: C, config: EngineConfig) -> Result<Self> {
        Self::from_shared(Arc::new(repository), Arc::new(cache), config)
    }
}

impl<R, C> ShorteningEngine<R, C>
where
    R: Repository + ?Sized,
    C: UrlCache + ?Sized,
{
    /// Creates an engine over shared handles, e.g. `Arc<dyn Repository>`
    /// chosen at runtime.
    pub fn from_shared(repository: Arc<R>, cache: Arc<C>, config: EngineConfig) -> Result<Self> {
        let chain = config.hash_chain()?;
        Ok(Self {
            repository,
            cache,
            chain,
            cache_ttl: config.cache_ttl,
        })
    }

    async fn cache_put(&self, code: &ShortCode, record: &UrlRecord) {
        if let Err(e) = self.cache.set_url(code, record, Some(self.cache_ttl)).await {
            warn!(code = %code, error = %e, "Failed to write URL record to cache");
        }
    }

    async fn cache_get(&self, code: &ShortCode) -> Option<UrlRecord> {
        match self.cache.get_url(code).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(code = %code, error = %e, "Cache read failed, falling back to store");
                None
            }
        }
    }

    async fn cache_evict(&self, code: &ShortCode) {
        if let Err(e) = self.cache.del(code).await {
            warn!(code = %code, error = %e, "Failed to evict URL record from cache");
        }
    }

    /// Looks up the code a URL is already stored under after a collision.
    /// Returns the code with its record, or `None` if the URL is not stored.
    async fn existing_mapping(&self, url: &str) -> Result<Option<(ShortCode, UrlRecord)>> {
        let Some(code) = self.repository.get_by_url(url).await? else {
            return Ok(None);
        };
        // The row can be deleted between the two reads.
        Ok(self
            .repository
            .get(&code)
            .await?
            .filter(|record| record.original_url == url)
            .map(|record| (code, record)))
    }
}

#[async_trait]
impl<R, C> Shortener for ShorteningEngine<R, C>
where
    R: Repository + ?Sized,
    C: UrlCache + ?Sized,
{
    async fn shorten(&self, original_url: &str) -> Result<ShortenOutcome> {
        validate_url(original_url)?;
        trace!(url = %original_url, "Shortening URL");

        let mut attempts = 0;
        for candidate in self.chain.candidates(original_url) {
            attempts += 1;
            let code = ShortCode::new(candidate.code)?;
            let record = UrlRecord::new(original_url);

            match self
                .repository
                .insert_if_absent(&code, record.clone())
                .await?
            {
                InsertOutcome::Inserted => {
                    debug!(code = %code, stage = %candidate.stage, "Created short URL");
                    self.cache_put(&code, &record).await;
                    return Ok(ShortenOutcome {
                        code,
                        created: true,
                    });
                }
                InsertOutcome::AlreadyExists(existing) if existing.original_url == original_url => {
                    debug!(code = %code, stage = %candidate.stage, "URL already shortened");
                    self.cache_put(&code, &existing).await;
                    return Ok(ShortenOutcome {
                        code,
                        created: false,
                    });
                }
                InsertOutcome::AlreadyExists(existing) => {
                    warn!(
                        code = %code,
                        stage = %candidate.stage,
                        url = %original_url,
                        existing_url = %existing.original_url,
                        "Short code collision"
                    );
                    if let Some((code, record)) = self.existing_mapping(original_url).await? {
                        debug!(code = %code, "URL already stored under a later-stage code");
                        self.cache_put(&code, &record).await;
                        return Ok(ShortenOutcome {
                            code,
                            created: false,
                        });
                    }
                }
            }
        }

        Err(ShortenerError::CollisionUnresolved {
            url: original_url.to_string(),
            attempts,
        })
    }

    async fn resolve(&self, code: &str) -> Result<Option<UrlRecord>> {
        let Ok(code) = ShortCode::new(code) else {
            trace!(code = %code, "Malformed short code, treating as not found");
            return Ok(None);
        };

        if let Some(record) = self.cache_get(&code).await {
            return Ok(Some(record));
        }

        // A delete landing between this read and the refill leaves the old
        // record cached; it is served until the TTL expires.
        match self.repository.get(&code).await? {
            Some(record) => {
                self.cache_put(&code, &record).await;
                Ok(Some(record))
            }
            None => {
                debug!(code = %code, "Short code not found");
                Ok(None)
            }
        }
    }

    async fn delete(&self, code: &str) -> Result<bool> {
        let Ok(code) = ShortCode::new(code) else {
            return Ok(false);
        };

        let removed = self.repository.delete(&code).await?;
        if removed {
            debug!(code = %code, "Deleted short URL");
            self.cache_evict(&code).await;
        }
        Ok(removed)
    }

    async fn list(&self) -> Result<Vec<UrlMapping>> {
        Ok(self.repository.list_all().await?)
    }
}
