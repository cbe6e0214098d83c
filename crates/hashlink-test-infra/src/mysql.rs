use crate::Result;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

/// Credentials and pool sizing for [`MySqlServer`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct MysqlConfig {
    #[builder(default = "hashlink".to_string())]
    database: String,
    #[builder(default = "hashlink".to_string())]
    username: String,
    #[builder(default = "hashlink".to_string())]
    password: String,
    #[builder(default = 8)]
    max_connections: u32,
    /// Connection attempts made by [`MySqlServer::pool`] before giving up.
    #[builder(default = 20)]
    connect_attempts: u32,
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A disposable MySQL 8.4 server.
///
/// The container logs "ready for connections" once during bootstrap and
/// again after the restart that follows it, so the first connections can
/// still be refused; [`pool`](MySqlServer::pool) retries until one succeeds.
pub struct MySqlServer {
    container: ContainerAsync<GenericImage>,
    config: MysqlConfig,
}

impl MySqlServer {
    pub async fn new(config: MysqlConfig) -> Result<Self> {
        let container = GenericImage::new("mysql", "8.4")
            .with_exposed_port(3306_u16.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", "root")
            .start()
            .await?;

        Ok(Self { container, config })
    }

    pub async fn database_url(&self) -> Result<String> {
        let host = self.container.get_host().await?;
        let port = self.container.get_host_port_ipv4(3306).await?;
        Ok(format!(
            "mysql://{}:{}@{}:{}/{}",
            self.config.username, self.config.password, host, port, self.config.database
        ))
    }

    /// Opens a pool against the server, retrying while it finishes booting,
    /// and runs each statement of `schema` on it.
    ///
    /// # Arguments
    ///
    /// * `schema` - DDL statements to apply, e.g. `hashlink_storage::mysql::SCHEMA`
    pub async fn pool(&self, schema: &[&str]) -> Result<MySqlPool> {
        let url = self.database_url().await?;
        let pool = self.connect_with_retry(&url).await?;

        for statement in schema {
            sqlx::query(*statement).execute(&pool).await?;
        }

        Ok(pool)
    }

    async fn connect_with_retry(&self, url: &str) -> Result<MySqlPool> {
        let mut attempt = 1;
        loop {
            match MySqlPoolOptions::new()
                .max_connections(self.config.max_connections)
                .connect(url)
                .await
            {
                Ok(pool) => return Ok(pool),
                Err(err) if attempt >= self.config.connect_attempts => return Err(err.into()),
                Err(_) => {
                    attempt += 1;
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MysqlConfig::default();
        assert_eq!(config.database, "hashlink");
        assert_eq!(config.username, "hashlink");
        assert_eq!(config.max_connections, 8);
        assert_eq!(config.connect_attempts, 20);
    }
}
