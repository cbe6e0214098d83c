use crate::cli::{CacheBackendArg, Cli, StorageBackendArg};
use anyhow::Context;
use hashlink_cache::{MokaUrlCache, RedisUrlCache};
use hashlink_core::{Repository, Shortener, UrlCache};
use hashlink_shortener::ShorteningEngine;
use hashlink_storage::{InMemoryRepository, MySqlRepository};
use std::sync::Arc;
use tracing::info;

/// Connects the storage and cache backends selected on the command line and
/// assembles the engine over them.
pub async fn build_shortener(cli: &Cli) -> anyhow::Result<Arc<dyn Shortener>> {
    let repository: Arc<dyn Repository> = match cli.storage {
        StorageBackendArg::InMemory => Arc::new(InMemoryRepository::new()),
        StorageBackendArg::Mysql => {
            let dsn = cli
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(dsn)
                .await
                .context("failed to connect to MySQL")?;
            repository
                .migrate()
                .await
                .context("failed to create MySQL schema")?;
            info!("MySQL schema ready");
            Arc::new(repository)
        }
    };

    let cache: Arc<dyn UrlCache> = match cli.cache {
        CacheBackendArg::Moka => Arc::new(MokaUrlCache::with_capacity(cli.cache_capacity)),
        CacheBackendArg::Redis => {
            let url = cli
                .redis_url
                .as_deref()
                .context("redis url is required when cache backend is redis")?;
            let cache = RedisUrlCache::connect(url)
                .await
                .context("failed to connect to Redis")?;
            Arc::new(cache)
        }
    };

    let engine = ShorteningEngine::from_shared(repository, cache, cli.engine_config())
        .context("invalid engine configuration")?;
    Ok(Arc::new(engine))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn default_backends_are_in_process() {
        let cli = Cli::try_parse_from(["hashlink", "--code-length", "10"]).unwrap();
        let shortener = build_shortener(&cli).await.unwrap();

        let outcome = shortener.shorten("https://example.com").await.unwrap();
        assert!(outcome.created);
        assert_eq!(outcome.code.as_str().len(), 10);
    }
}
